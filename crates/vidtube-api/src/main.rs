//! VidTube API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p vidtube-api
//! ```
//!
//! Configuration is loaded from environment variables (and a `.env` file if present).

use tracing::{error, info};
use vidtube_common::{try_init_tracing_with_config, AppConfig, TracingConfig};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Server failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        "Configuration loaded"
    );

    vidtube_api::run(config).await?;

    Ok(())
}
