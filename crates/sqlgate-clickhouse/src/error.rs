//! Error types for the ClickHouse adapter.

use sqlgate_core::EngineError;
use thiserror::Error;

/// Errors that can occur while talking to ClickHouse.
#[derive(Debug, Error)]
pub enum ClickHouseError {
    /// A forwarded header could not be encoded.
    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request did not complete.
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// ClickHouse answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A line of the response was not a JSON object.
    #[error("line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Rows can only be decoded from a JSON format.
    #[error("format {0} cannot be decoded into rows")]
    UnsupportedFormat(&'static str),
}

impl From<ClickHouseError> for EngineError {
    fn from(err: ClickHouseError) -> Self {
        match err {
            ClickHouseError::Server { status, message } => EngineError::Server { status, message },
            ClickHouseError::Decode { .. } => EngineError::Decode(err.to_string()),
            ClickHouseError::UnsupportedFormat(format) => EngineError::UnsupportedFormat(format),
            other => EngineError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_keeps_message() {
        let err: EngineError = ClickHouseError::Server {
            status: 404,
            message: "Code: 60. DB::Exception: Unknown table".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Code: 60. DB::Exception: Unknown table");
    }

    #[test]
    fn test_invalid_header_is_transport() {
        let err: EngineError = ClickHouseError::InvalidHeader {
            name: "x-clickhouse-user".into(),
            reason: "bad".into(),
        }
        .into();
        assert!(matches!(err, EngineError::Transport(_)));
    }
}
