//! Gateway server implementation.

use crate::config::AppConfig;
use crate::error::GatewayError;
use crate::gateway::QueryGateway;
use crate::routes;
use crate::seed;
use axum::Router;
use sqlgate_core::{EngineFactory, EngineTarget, ProjectedHeaders};
use std::sync::Arc;
use tokio::net::TcpListener;

/// The gateway server.
pub struct GatewayServer {
    config: AppConfig,
    engines: Arc<dyn EngineFactory>,
}

impl GatewayServer {
    /// Create a new server with the given configuration and engine factory.
    pub fn new(config: AppConfig, engines: Arc<dyn EngineFactory>) -> Self {
        Self { config, engines }
    }

    /// Build the router without binding a socket.
    pub fn router(&self) -> Router {
        let gateway = Arc::new(QueryGateway::new(
            self.config.gateway(),
            Arc::clone(&self.engines),
        ));
        routes::create_router(gateway, &self.config.server)
    }

    /// Seed sample data if configured, then serve until Ctrl-C.
    pub async fn run(self) -> Result<(), GatewayError> {
        self.seed().await;

        let addr = &self.config.server.bind;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::StartupFailed(format!("bind {}: {}", addr, e)))?;

        tracing::info!(
            address = %addr,
            clickhouse_url = %self.config.clickhouse.url,
            "sqlgate server listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| GatewayError::StartupFailed(e.to_string()))?;

        Ok(())
    }

    async fn seed(&self) {
        let Some(seed) = &self.config.seed else {
            return;
        };

        let target = EngineTarget::new(self.config.clickhouse.url.clone(), ProjectedHeaders::new());
        match self.engines.connect(target) {
            Ok(engine) => seed::initial_migration(engine.as_ref(), seed).await,
            Err(e) => tracing::error!(error = %e, "Error initializing database"),
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
