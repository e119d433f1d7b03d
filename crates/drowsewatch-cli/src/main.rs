//! Drowsewatch CLI Entry Point
//!
//! This is the main entry point for the drowsewatch command-line tool.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use drowsewatch_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            drowsewatch_cli::run::execute(args).await?;
        }
        Commands::Version => {
            println!("drowsewatch {}", env!("CARGO_PKG_VERSION"));
            println!("monitor module version: {}", drowsewatch_monitor::VERSION);
        }
    }

    Ok(())
}
