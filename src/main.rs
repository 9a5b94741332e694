mod cli;
mod commands;
mod constants;
mod core;
mod error;
mod models;
mod utils;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::models::MonitorConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aztecmon=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = cli::Cli::parse();

    let config_path = cli.config.unwrap_or_else(|| {
        PathBuf::from(constants::CONFIG_DIR).join(constants::APP_CONFIG)
    });
    let config = match MonitorConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: invalid config {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        cli::Commands::Status { verbose } => commands::status::execute(&config, verbose).await,

        cli::Commands::Sync { port } => commands::sync::execute(&config, port).await,

        cli::Commands::Health { exec_rpc, beacon } => {
            commands::health::execute(&exec_rpc, beacon.as_deref()).await
        }

        cli::Commands::Peers => commands::peers::execute(&config).await,

        cli::Commands::Validator => commands::validator::execute(&config).await,

        cli::Commands::Versions { no_cache } => {
            commands::versions::execute(&config, no_cache).await
        }

        cli::Commands::CheckUpdate => commands::check_update::execute(&config).await,

        cli::Commands::Update { version, yes } => {
            commands::update::execute(&config, &version, yes).await
        }

        cli::Commands::Logs {
            lines,
            level,
            component,
        } => commands::logs::execute(&config, lines, level.as_deref(), component.as_deref()).await,

        cli::Commands::PortCheck { port, ip } => {
            commands::port_check::execute(&config, port, ip).await
        }

        cli::Commands::Watch => commands::watch::execute(&config).await,
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
