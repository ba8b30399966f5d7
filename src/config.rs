//! User configuration stored as TOML.
//!
//! Lives at `<config dir>/markers/config.toml`. Missing files and missing
//! fields fall back to defaults; `migrate_config` writes those defaults into
//! an existing file without touching what is already there.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use toml_edit::{DocumentMut, Item};

use crate::tracker::{TrackerConfig, DEFAULT_EPSILON};

/// Default seconds between simulated playback ticks.
pub const DEFAULT_TICK: f64 = 0.25;

/// Complete user configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tracker: TrackerSection,
    pub replay: ReplaySection,
}

/// `[tracker]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSection {
    /// Markers within this many seconds of the position count as reached
    pub epsilon: f64,
}

impl Default for TrackerSection {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// `[replay]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaySection {
    /// Seconds between simulated `timeupdate` ticks
    pub tick: f64,
}

impl Default for ReplaySection {
    fn default() -> Self {
        Self { tick: DEFAULT_TICK }
    }
}

impl Config {
    /// Default location of the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("markers").join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("Failed to write config file: {:?}", path))
    }

    /// Tracker settings derived from this config.
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig::new(self.tracker.epsilon)
    }
}

/// Outcome of [`migrate_config`].
#[derive(Debug, Clone, PartialEq)]
pub struct MigrateResult {
    /// Config content with missing fields added
    pub content: String,
    /// Added fields as `section.key`
    pub added_fields: Vec<String>,
    /// Sections that did not exist before
    pub sections_added: Vec<String>,
}

impl MigrateResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty()
    }
}

/// Add every field missing from `content` with its default value.
///
/// Existing values, comments and ordering are preserved.
pub fn migrate_config(content: &str) -> Result<MigrateResult> {
    let mut doc: DocumentMut = content.parse().context("Failed to parse config file")?;
    let defaults: DocumentMut = toml::to_string_pretty(&Config::default())
        .context("Failed to serialize default config")?
        .parse()
        .context("Failed to parse default config")?;

    let mut added_fields = Vec::new();
    let mut sections_added = Vec::new();

    for (section, item) in defaults.iter() {
        let Some(default_table) = item.as_table() else {
            continue;
        };

        if !doc.contains_key(section) {
            doc.insert(section, Item::Table(default_table.clone()));
            sections_added.push(section.to_string());
            added_fields.extend(
                default_table
                    .iter()
                    .map(|(key, _)| format!("{}.{}", section, key)),
            );
            continue;
        }

        let Some(table) = doc[section].as_table_mut() else {
            bail!("Config entry '{}' must be a table", section);
        };
        for (key, value) in default_table.iter() {
            if !table.contains_key(key) {
                table.insert(key, value.clone());
                added_fields.push(format!("{}.{}", section, key));
            }
        }
    }

    Ok(MigrateResult {
        content: doc.to_string(),
        added_fields,
        sections_added,
    })
}
