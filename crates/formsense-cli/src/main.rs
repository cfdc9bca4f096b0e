//! FormSense CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use formsense_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay(replay_cmd) => {
            formsense_cli::replay::execute(replay_cmd).await?;
        }
        Commands::Version => {
            println!("formsense {}", env!("CARGO_PKG_VERSION"));
            println!("engine version: {}", formsense_engine::VERSION);
            println!("core version: {}", formsense_core::VERSION);
        }
    }

    Ok(())
}
