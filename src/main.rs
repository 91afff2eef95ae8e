use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use editorial::Server;
use editorial::app::{self, Services};
use editorial::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter().into()),
        )
        .init();

    tracing::info!("editorial v{}", env!("CARGO_PKG_VERSION"));

    let services = Services::from_config(&config)
        .await
        .with_context(|| format!("opening {:?} storage", config.storage))?;

    Server::bind(config.bind)
        .serve(app::router(&services))
        .await
        .context("server error")?;

    Ok(())
}
