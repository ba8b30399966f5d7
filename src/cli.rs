//! Command line definitions.
//!
//! Kept in the library so `xtask` can render man pages from the same
//! definitions the binary parses.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::overlay::SeekPlan;

/// Version string shown by `--version`.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("MARKERS_BUILD_DATE"),
    ")"
);

/// Version string shown by `--version`.
#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MARKERS_BUILD_DATE"),
    ")"
);

#[derive(Debug, Parser)]
#[command(
    name = "markers",
    version = VERSION,
    about = "Inspect and replay timeline markers",
    long_about = "Inspect and replay timeline markers.\n\n\
        Markers are loaded from .json, .toml or asciicast v3 (.cast) files."
)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List markers in timeline order
    List {
        /// Marker file (.json, .toml or .cast)
        file: PathBuf,

        /// Media duration in seconds, for marker positions
        #[arg(long, value_name = "SECS")]
        duration: Option<f64>,
    },

    /// Simulate playback and print every reached marker
    Replay {
        /// Marker file (.json, .toml or .cast)
        file: PathBuf,

        /// Media duration in seconds (defaults to the file's duration)
        #[arg(long, value_name = "SECS")]
        duration: Option<f64>,

        /// Seconds between playback ticks (defaults to the config value)
        #[arg(long, value_name = "SECS")]
        tick: Option<f64>,

        /// Seek to TO when playback reaches AT, e.g. --seek 30=10
        #[arg(long = "seek", value_name = "AT=TO")]
        seeks: Vec<SeekPlan>,
    },

    /// Show or migrate the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    Show,

    /// Add missing fields to the configuration file
    Migrate {
        /// Apply changes without asking
        #[arg(long, short)]
        yes: bool,
    },
}
