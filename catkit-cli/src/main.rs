//! Catkit CLI
//!
//! Command-line interface for the catalog platform's HTTP APIs: stub
//! document creation, document retrieval, bulk sensitivity flagging, and
//! cold start task tracking.

mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "catkit")]
#[command(about = "Catalog API toolkit", long_about = None)]
struct Cli {
    /// Catalog instance base URL
    #[arg(long, env = "CATKIT_BASE_URL")]
    base_url: String,

    /// API token for catalog endpoints
    #[arg(long, env = "CATKIT_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catkit=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        base_url: cli.base_url,
        api_token: cli.api_token,
    };

    handle_command(cli.command, &config).await
}
