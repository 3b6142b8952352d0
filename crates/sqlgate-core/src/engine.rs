//! Downstream analytical engine capability.
//!
//! The gateway never holds a long-lived engine handle: an [`EngineFactory`]
//! builds a fresh [`Engine`] for every request from an [`EngineTarget`], and
//! the handle is dropped once the statement completes or fails.

use crate::headers::ProjectedHeaders;
use crate::response::{FailureInfo, QueryResult};
use async_trait::async_trait;
use thiserror::Error;

/// Engine URL used when nothing else is configured.
pub const DEFAULT_CLICKHOUSE_URL: &str = "http://localhost:8123";

/// Data formats understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// One JSON object per line.
    JsonEachRow,
    Csv,
}

impl DataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::JsonEachRow => "JSONEachRow",
            DataFormat::Csv => "CSV",
        }
    }
}

/// Where and how to reach the engine for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineTarget {
    pub url: String,
    pub http_headers: ProjectedHeaders,
}

impl EngineTarget {
    pub fn new(url: impl Into<String>, http_headers: ProjectedHeaders) -> Self {
        Self {
            url: url.into(),
            http_headers,
        }
    }
}

/// Errors raised by an engine implementation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not be reached.
    #[error("{0}")]
    Transport(String),

    /// The engine answered with an error.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The engine answered but the payload could not be decoded.
    #[error("failed to decode result set: {0}")]
    Decode(String),

    /// The requested format cannot be used for this operation.
    #[error("format {0} is not supported for this operation")]
    UnsupportedFormat(&'static str),

    /// A failure without any usable message.
    #[error("engine failure")]
    Opaque,
}

impl EngineError {
    /// Message-bearing view of this error for response mapping.
    pub fn failure_info(&self) -> FailureInfo {
        match self {
            EngineError::Opaque => FailureInfo::Opaque,
            EngineError::Server { message, .. } if message.is_empty() => FailureInfo::Opaque,
            other => FailureInfo::Message(other.to_string()),
        }
    }
}

/// The engine operations the gateway and the seeding step rely on.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Run a statement that returns no rows.
    async fn command(&self, sql: &str) -> Result<(), EngineError>;

    /// Run a statement and materialize every row it produces.
    async fn query(&self, sql: &str, format: DataFormat) -> Result<QueryResult, EngineError>;

    /// Bulk-load `values`, encoded in `format`, into `table`.
    async fn insert(&self, table: &str, values: Vec<u8>, format: DataFormat)
    -> Result<(), EngineError>;
}

/// Builds request-scoped engine handles.
pub trait EngineFactory: Send + Sync {
    fn connect(&self, target: EngineTarget) -> Result<Box<dyn Engine>, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::SERVER_FALLBACK_MESSAGE;

    #[test]
    fn test_format_names() {
        assert_eq!(DataFormat::JsonEachRow.as_str(), "JSONEachRow");
        assert_eq!(DataFormat::Csv.as_str(), "CSV");
    }

    #[test]
    fn test_failure_info_from_engine_error() {
        let err = EngineError::Server {
            status: 404,
            message: "Database error".into(),
        };
        assert_eq!(err.failure_info(), FailureInfo::Message("Database error".into()));

        let err = EngineError::Server {
            status: 500,
            message: String::new(),
        };
        assert_eq!(
            err.failure_info().resolve(SERVER_FALLBACK_MESSAGE),
            "Internal server error"
        );

        assert_eq!(EngineError::Opaque.failure_info(), FailureInfo::Opaque);
    }
}
