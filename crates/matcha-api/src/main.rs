//! Matcha API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p matcha-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env`.

use anyhow::Context;
use matcha_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Server failed to start: {e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let log_format = std::env::var("LOG_FORMAT").ok();
    if let Err(e) = try_init_tracing(
        TracingConfig::for_environment(config.app.env).with_format_override(log_format.as_deref()),
    ) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.api.port,
        "Configuration loaded"
    );

    matcha_api::run(config).await.context("Server error")?;

    Ok(())
}
