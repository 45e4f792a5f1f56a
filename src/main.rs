//! finbrief CLI entrypoint

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finbrief::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Parse first so --log-level can feed the filter
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(cli.env_filter())
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    cli.execute().await
}
