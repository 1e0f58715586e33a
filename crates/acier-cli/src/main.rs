//! Acier CLI
//!
//! Command-line interface for Directory Server ACI management.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use acier_cli::cli::{Cli, Command};
use acier_cli::config_handlers::handle_config_command;
use acier_cli::{AcierConfig, commands};
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; `log` records from the libraries are captured too
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,acier=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Config { action } => {
            handle_config_command(cli.config.as_deref(), action).await?;
        }
        command => {
            let config = AcierConfig::load(cli.config.as_deref())?;
            tracing::debug!(store = %config.store.path.display(), "Loaded configuration");
            println!("{}", commands::run(&config, command).await?);
        }
    }
    Ok(())
}
