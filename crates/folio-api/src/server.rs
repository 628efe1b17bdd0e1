//! API server implementation.

use axum::{middleware, Router};
use folio_core::ServerConfig;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::middleware::{cors, request_body_limit_layer, request_id, request_logging};
use crate::routes;
use crate::state::AppState;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Upper bound on a single request; exceeded requests get 408.
    pub request_timeout: Duration,
    /// Maximum request body size in bytes.
    pub body_limit: usize,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for ApiServerConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            request_timeout: config.request_timeout,
            body_limit: config.body_limit,
        }
    }
}

/// API server.
pub struct ApiServer {
    config: ApiServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Creates a new API server.
    pub fn new(state: AppState, config: ApiServerConfig) -> Self {
        Self { config, state }
    }

    /// Creates a new API server with default configuration.
    pub fn with_state(state: AppState) -> Self {
        Self::new(state, ApiServerConfig::default())
    }

    /// Builds the router with the full middleware stack.
    pub fn router(&self) -> Router {
        routes::health::init_start_time();

        // Innermost first; CORS wraps every layer below it
        routes::create_router(self.state.clone())
            .layer(middleware::from_fn(request_logging))
            .layer(middleware::from_fn(request_id))
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(self.config.request_timeout))
            .layer(request_body_limit_layer(self.config.body_limit))
            .layer(CatchPanicLayer::new())
            .layer(middleware::from_fn_with_state(
                self.state.cors.clone(),
                cors,
            ))
    }

    /// Runs the server until Ctrl+C or SIGTERM.
    pub async fn run(self) -> Result<(), std::io::Error> {
        self.run_until(shutdown_signal()).await
    }

    /// Runs the server with a custom shutdown signal.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let listener =
            TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;

        info!(address = %listener.local_addr()?, "Starting API server");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("API server shut down gracefully");
        Ok(())
    }
}

/// Default shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
