//! Server setup and lifecycle management

use crate::api::{create_router, AppState};
use crate::classifier::load_classifier;
use crate::config::DaemonConfig;
use crate::error::{DaemonError, DaemonResult};
use axum::Router;
use tokio::net::TcpListener;

/// AirQ forecast server
pub struct Server {
    config: DaemonConfig,
    state: AppState,
}

impl Server {
    /// Create a new server, loading the classifier once.
    ///
    /// A classifier that fails to load leaves the server in degraded mode rather
    /// than aborting startup.
    pub fn new(config: DaemonConfig) -> Self {
        let classifier = match load_classifier(&config.classifier) {
            Ok(classifier) => Some(classifier),
            Err(err) => {
                tracing::error!(
                    error = %err,
                    path = %config.classifier.model_path.display(),
                    "Failed to load classifier, forecasts disabled"
                );
                None
            }
        };

        Self {
            state: AppState::new(classifier),
            config,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone(), self.config.server.enable_cors)
    }

    /// Run the server until a shutdown signal arrives
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;
        let app = self.router();

        let listener = TcpListener::bind(addr).await?;

        tracing::info!("AirQ daemon listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("AirQ daemon shutting down");

        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
