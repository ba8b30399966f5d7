mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use markers::cli::{Cli, Commands, ConfigCommands};

/// Log filter used when `MARKERS_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

fn init_logging() {
    let filter = EnvFilter::try_from_env("MARKERS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::List { file, duration } => commands::list::handle(config_path, &file, duration),
        Commands::Replay {
            file,
            duration,
            tick,
            seeks,
        } => commands::replay::handle(config_path, &file, duration, tick, seeks),
        Commands::Config(ConfigCommands::Show) => commands::config::handle_show(config_path),
        Commands::Config(ConfigCommands::Migrate { yes }) => {
            commands::config::handle_migrate(config_path, yes)
        }
        Commands::Completions { shell } => {
            commands::completions::handle(shell);
            Ok(())
        }
    }
}
