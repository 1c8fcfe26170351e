//! Tool Catalog - Main entry point.
//!
//! Serves the catalog API over HTTP, backed by a single JSON data file.

use std::sync::Arc;
use tool_catalog::config::Config;
use tool_catalog::store::CatalogStore;
use tool_catalog::transport::{AppState, HttpTransport};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from command line and environment
    let config = Config::parse_args();

    init_tracing(&config);

    if let Err(msg) = config.validate() {
        error!(error = %msg, "Invalid configuration");
        return Err(msg.into());
    }

    info!(
        data_file = %config.data_file.display(),
        "Starting Tool Catalog v{}",
        env!("CARGO_PKG_VERSION")
    );

    let store = match CatalogStore::open(&config.data_file).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!(error = %e, "Failed to load catalog");
            return Err(e.into());
        }
    };

    let transport = HttpTransport::new(AppState::new(store), &config.http_host, config.http_port)
        .with_cors(config.cors);

    if let Err(e) = transport.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
