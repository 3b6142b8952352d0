//! Uniform result shapes shared by the gateway and its client.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fallback used by the client when a failure carries no message at all.
pub const CLIENT_FALLBACK_MESSAGE: &str = "An unknown error occurred";

/// Fallback used by the gateway when a downstream failure carries no message.
pub const SERVER_FALLBACK_MESSAGE: &str = "Internal server error";

/// Column name to scalar value.
pub type Row = Map<String, Value>;

/// Rows in the order the engine produced them. Empty is a valid result.
pub type QueryResult = Vec<Row>;

/// Outcome of executing one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResponse {
    Success { rows: QueryResult },
    Failure { message: String, status_code: u16 },
}

impl ExecutionResponse {
    pub fn success(rows: QueryResult) -> Self {
        Self::Success { rows }
    }

    pub fn failure(message: impl Into<String>, status_code: u16) -> Self {
        Self::Failure {
            message: message.into(),
            status_code,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success { .. } => 200,
            Self::Failure { status_code, .. } => *status_code,
        }
    }

    /// JSON body sent over the wire.
    pub fn into_body(self) -> ResponseBody {
        match self {
            Self::Success { rows } => ResponseBody::Rows { rows },
            Self::Failure { message, .. } => ResponseBody::Error { error: message },
        }
    }
}

/// Wire format of a `/query` response: `{ "rows": [...] }` or `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Rows { rows: QueryResult },
    Error { error: String },
}

/// What is known about a failure, independent of where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureInfo {
    /// A structured payload carried an embedded error text.
    Payload(String),
    /// The failure had its own message.
    Message(String),
    /// Nothing usable.
    Opaque,
}

impl FailureInfo {
    /// Pick the most specific source: payload error, then message.
    pub fn from_parts(payload_error: Option<String>, message: Option<String>) -> Self {
        match (payload_error, message) {
            (Some(error), _) => Self::Payload(error),
            (None, Some(message)) => Self::Message(message),
            (None, None) => Self::Opaque,
        }
    }

    /// Resolve to the user-facing message, using `fallback` when nothing is known.
    pub fn resolve(self, fallback: &str) -> String {
        match self {
            Self::Payload(error) => error,
            Self::Message(message) => message,
            Self::Opaque => fallback.to_string(),
        }
    }
}
