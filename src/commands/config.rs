//! Config subcommands handler

use std::collections::HashSet;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use markers::config::migrate_config;
use markers::Config;

use super::load_config;

const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

/// Show current configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    print!("{}", toml_str);
    Ok(())
}

/// Migrate config file by adding missing fields.
///
/// A missing file is offered for creation with full defaults. Changes are
/// previewed and need confirmation unless `yes` is set.
#[cfg(not(tarpaulin_include))]
pub fn handle_migrate(config_path: Option<&Path>, yes: bool) -> Result<()> {
    let config_path = resolve_path(config_path)?;
    let file_exists = config_path.exists();

    let content = if file_exists {
        fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?
    } else {
        String::new()
    };

    let result = migrate_config(&content)?;

    if !result.has_changes() {
        println!("Config is already up to date.");
        return Ok(());
    }

    if file_exists {
        let total_fields = result.added_fields.len();
        let total_sections = result.sections_added.len();
        if total_sections > 0 {
            println!(
                "Found {} missing field(s) in {} new section(s):",
                total_fields, total_sections
            );
        } else {
            println!("Found {} missing field(s):", total_fields);
        }
    } else {
        println!("Config file does not exist. Will create with default settings.");
    }
    println!();
    let color = atty::is(atty::Stream::Stdout);
    for line in diff_preview(&result.content, &result.added_fields, !file_exists, color) {
        println!("{}", line);
    }
    println!();

    let question = if file_exists {
        format!("Apply these changes to {}?", config_path.display())
    } else {
        format!("Create {}?", config_path.display())
    };
    if !yes && !prompt_confirmation(&question)? {
        println!("No changes made.");
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }
    fs::write(&config_path, &result.content)
        .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

    if file_exists {
        println!("Config updated successfully.");
    } else {
        println!("Config file created successfully.");
    }
    Ok(())
}

/// Diff-style preview lines of the migrated config.
///
/// Added fields get a `+` prefix, along with the header of a section that
/// was added, coloured green when `color` is set. For new files every
/// non-empty line counts as added.
fn diff_preview(
    new_content: &str,
    added_fields: &[String],
    is_new_file: bool,
    color: bool,
) -> Vec<String> {
    let (start, end) = if color { (GREEN, RESET) } else { ("", "") };
    let added: HashSet<&str> = added_fields.iter().map(String::as_str).collect();
    let mut lines = Vec::new();
    let mut current_section = String::new();
    let mut pending_header: Option<String> = None;

    for line in new_content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            current_section = trimmed[1..trimmed.len() - 1].to_string();
            let prefix = format!("{}.", current_section);
            let has_additions = added_fields.iter().any(|f| f.starts_with(&prefix));
            pending_header = (is_new_file || has_additions).then(|| line.to_string());
            continue;
        }

        let is_added = match trimmed.split_once('=') {
            Some((key, _)) => {
                let field = format!("{}.{}", current_section, key.trim());
                is_new_file || added.contains(field.as_str())
            }
            None => is_new_file && !trimmed.is_empty(),
        };
        if !is_added {
            continue;
        }

        if let Some(header) = pending_header.take() {
            lines.push(format!("{}+ {}{}", start, header, end));
        }
        lines.push(format!("{}+ {}{}", start, line, end));
    }
    lines
}

/// Prompt user for yes/no confirmation.
///
/// Returns true if user confirms (y/yes), false otherwise.
/// If stdin is not a TTY (non-interactive), returns false.
fn prompt_confirmation(message: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        println!("Non-interactive mode: use --yes to apply changes automatically");
        return Ok(false);
    }

    print!("{} [y/N] ", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
