//! gratuity-engine: HTTP service for restaurant event close-out.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gratuity_engine::api::{AppState, create_router};
use gratuity_engine::config::ConfigLoader;
use tracing::info;

/// Serves the Gratuity Engine API.
#[derive(Debug, Parser)]
#[command(name = "gratuity-engine", version, about)]
struct Args {
    /// Restaurant configuration directory.
    #[arg(long, env = "GRATUITY_CONFIG", default_value = "./config/default")]
    config: PathBuf,

    /// Address to listen on.
    #[arg(long, env = "GRATUITY_BIND", default_value = "127.0.0.1:3000")]
    bind: String,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    let loader = ConfigLoader::load(&args.config)
        .with_context(|| format!("unable to load configuration from {}", args.config.display()))?;
    info!(
        restaurant_id = %loader.restaurant().id,
        employees = loader.employees().employees().len(),
        "Configuration loaded"
    );

    let router = create_router(AppState::new(loader));
    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("unable to bind {}", args.bind))?;
    info!("gratuity-engine listening on {}", args.bind);

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
