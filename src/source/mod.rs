//! Marker lists loaded from files.
//!
//! Three formats are understood, picked by file extension:
//!
//! - `.json`: an array of markers, or an object `{"duration": .., "markers": [..]}`
//! - `.toml`: an optional top-level `duration` and `[[marker]]` tables
//! - `.cast`: asciicast v3 recordings, whose marker events become markers
//!
//! A marker entry has `time` and optional `duration`, `text` and `class`.

mod cast;

use std::fs;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::marker::MarkerOptions;

/// Markers read from a file, plus the media duration if the file knows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, rename = "marker", alias = "markers")]
    pub markers: Vec<MarkerOptions>,
}

/// Supported marker file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerFormat {
    Json,
    Toml,
    Cast,
}

impl MarkerFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "cast" => Some(Self::Cast),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonMarkers {
    List(Vec<MarkerOptions>),
    File(MarkerFile),
}

impl MarkerFile {
    /// Load a marker file, choosing the format by extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let Some(format) = MarkerFormat::from_path(path) else {
            bail!(
                "Unsupported marker file {:?} (expected .json, .toml or .cast)",
                path
            );
        };

        let file = match format {
            MarkerFormat::Cast => {
                let file = fs::File::open(path)
                    .with_context(|| format!("Failed to open file: {:?}", path))?;
                cast::parse_reader(BufReader::new(file))
            }
            MarkerFormat::Json | MarkerFormat::Toml => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read file: {:?}", path))?;
                Self::parse_str(&content, format)
            }
        }
        .with_context(|| format!("Failed to load markers from {:?}", path))?;

        tracing::debug!(path = %path.display(), count = file.markers.len(), "marker file loaded");
        Ok(file)
    }

    /// Parse marker file content in the given format.
    pub fn parse_str(content: &str, format: MarkerFormat) -> Result<Self> {
        match format {
            MarkerFormat::Json => {
                let parsed: JsonMarkers =
                    serde_json::from_str(content).context("Failed to parse marker JSON")?;
                Ok(match parsed {
                    JsonMarkers::List(markers) => Self {
                        duration: None,
                        markers,
                    },
                    JsonMarkers::File(file) => file,
                })
            }
            MarkerFormat::Toml => toml::from_str(content).context("Failed to parse marker TOML"),
            MarkerFormat::Cast => cast::parse_reader(BufReader::new(content.as_bytes())),
        }
    }
}
