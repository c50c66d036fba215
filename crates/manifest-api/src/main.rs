//! Manifest API - Kubernetes manifest generation service
//!
//! Serves generation, validation and advisory endpoints over HTTP, plus
//! health and Prometheus metrics.

use anyhow::Result;
use manifest_api::{api, config::ApiConfig};
use manifest_lib::observability::{GeneratorMetrics, StructuredLogger};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    let config = ApiConfig::load()?;

    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .with(fmt::layer().json())
        .init();

    let metrics = GeneratorMetrics::new();
    let logger = StructuredLogger::new("manifest-api");
    logger.log_startup(SERVICE_VERSION, &config.socket_addr());

    let app_state = Arc::new(api::AppState::new(metrics, logger.clone()));

    tokio::select! {
        result = api::serve(config, app_state) => {
            result?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            logger.log_shutdown("SIGINT received");
            info!("Shutting down");
        }
    }

    Ok(())
}
