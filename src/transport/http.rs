//! HTTP transport for the catalog API.
//!
//! Binds the listener, wraps the router with tracing and optional CORS layers,
//! and shuts down gracefully on SIGINT or SIGTERM.

use crate::error::{CatalogError, CatalogResult};
use crate::transport::routes::{AppState, router};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::Notify;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// How long in-flight requests may run after the first shutdown signal.
const DRAIN_WINDOW: Duration = Duration::from_secs(10);

pub struct HttpTransport {
    state: AppState,
    /// Host to bind to
    host: String,
    /// Port to bind to
    port: u16,
    /// Attach a permissive CORS layer
    cors: bool,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Arguments
    ///
    /// * `state` - Shared store and services handed to every handler
    /// * `host` - Host address to bind to
    /// * `port` - Port to bind to
    pub fn new(state: AppState, host: impl Into<String>, port: u16) -> Self {
        Self {
            state,
            host: host.into(),
            port,
            cors: false,
        }
    }

    /// Enable or disable the permissive CORS layer.
    pub fn with_cors(mut self, cors: bool) -> Self {
        self.cors = cors;
        self
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The full application: routes plus middleware layers.
    pub fn app(&self) -> Router {
        let app = router(self.state.clone()).layer(TraceLayer::new_for_http());
        if self.cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            app
        }
    }

    /// Serve until a shutdown signal is received.
    pub async fn run(&self) -> CatalogResult<()> {
        let bind_addr = self.bind_addr();
        let listener = TcpListener::bind(&bind_addr).await.map_err(|e| {
            CatalogError::internal(format!("Failed to bind to {}: {}", bind_addr, e))
        })?;

        info!(addr = %bind_addr, cors = self.cors, "Catalog API listening");

        let stopping = Arc::new(Notify::new());
        let graceful = {
            let stopping = stopping.clone();
            async move {
                wait_for_signal().await;
                stopping.notify_one();
            }
        };

        let server = axum::serve(listener, self.app()).with_graceful_shutdown(graceful);

        // A clean drain wins; otherwise the drain window or a repeated signal ends it.
        tokio::select! {
            result = server => {
                if let Err(e) = result {
                    error!(error = %e, "Catalog API failed while serving");
                    return Err(CatalogError::internal(format!("HTTP server error: {}", e)));
                }
                info!("Catalog API drained and stopped");
            }
            outcome = drain_window(&stopping, DRAIN_WINDOW, wait_for_signal()) => {
                warn!(?outcome, "Catalog API stopped with requests still in flight");
            }
        }

        Ok(())
    }
}

/// Why in-flight requests were abandoned during shutdown.
#[derive(Debug, PartialEq, Eq)]
enum DrainOutcome {
    WindowElapsed,
    Interrupted,
}

/// Resolves once shutdown has started and then either `window` passes or
/// `interrupt` completes.
async fn drain_window(
    stopping: &Notify,
    window: Duration,
    interrupt: impl Future<Output = ()>,
) -> DrainOutcome {
    stopping.notified().await;
    info!(
        window_secs = window.as_secs(),
        "Shutdown requested, draining in-flight requests; signal again to stop now"
    );

    tokio::select! {
        _ = tokio::time::sleep(window) => DrainOutcome::WindowElapsed,
        _ = interrupt => DrainOutcome::Interrupted,
    }
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn wait_for_signal() {
    let ctrl_c = signal::ctrl_c();

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
