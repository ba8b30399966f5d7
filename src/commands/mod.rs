//! Subcommand handlers for the `markers` binary.

pub mod completions;
pub mod config;
pub mod list;
pub mod replay;

use std::path::Path;

use anyhow::Result;

use markers::Config;

/// Load the config from `--config` or the default location.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Format seconds as `MM:SS.mmm`, or `H:MM:SS.mmm` past the hour.
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}.{:03}", hours, minutes, secs, ms)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, secs, ms)
    }
}
