//! Per-statement execution: policy check, engine construction, response mapping.

use crate::error::GatewayError;
use sqlgate_core::{
    DEFAULT_CLICKHOUSE_URL, DataFormat, EngineError, EngineFactory, EngineTarget,
    ExecutionResponse, ProjectedHeaders, QueryResult, SERVER_FALLBACK_MESSAGE,
};
use sqlgate_policy::KeywordGuard;
use std::sync::Arc;

/// Settings the gateway needs at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL of the ClickHouse HTTP interface.
    pub clickhouse_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            clickhouse_url: DEFAULT_CLICKHOUSE_URL.to_string(),
        }
    }
}

/// Executes statements submitted to `POST /query`.
///
/// Holds no per-request state; every call builds and drops its own engine handle.
pub struct QueryGateway {
    config: GatewayConfig,
    guard: KeywordGuard,
    engines: Arc<dyn EngineFactory>,
}

impl QueryGateway {
    pub fn new(config: GatewayConfig, engines: Arc<dyn EngineFactory>) -> Self {
        Self {
            config,
            guard: KeywordGuard::new(),
            engines,
        }
    }

    /// Execute one statement and map the outcome to a response.
    pub async fn execute(
        &self,
        statement: Option<&str>,
        headers: ProjectedHeaders,
    ) -> ExecutionResponse {
        match self.run(statement, headers).await {
            Ok(rows) => ExecutionResponse::success(rows),
            Err(e) => ExecutionResponse::failure(e.to_string(), e.status_code().as_u16()),
        }
    }

    async fn run(
        &self,
        statement: Option<&str>,
        headers: ProjectedHeaders,
    ) -> Result<QueryResult, GatewayError> {
        let statement = self.guard.check(statement)?;

        let target = EngineTarget::new(self.config.clickhouse_url.clone(), headers);
        tracing::debug!(
            statement,
            forwarded_headers = target.http_headers.len(),
            "Executing statement"
        );

        let engine = self.engines.connect(target).map_err(downstream)?;
        let rows = engine
            .query(statement, DataFormat::JsonEachRow)
            .await
            .map_err(downstream)?;

        tracing::debug!(rows = rows.len(), "Statement completed");
        Ok(rows)
    }
}

fn downstream(err: EngineError) -> GatewayError {
    tracing::error!(error = %err, "Statement execution failed");
    GatewayError::Downstream(err.failure_info().resolve(SERVER_FALLBACK_MESSAGE))
}
