//! Error types for the gateway.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sqlgate_policy::PolicyError;
use thiserror::Error;

/// Errors that can occur in the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The statement was rejected before reaching the engine.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// The engine failed; holds the already-resolved message.
    #[error("{0}")]
    Downstream(String),

    /// Failed to start the server.
    #[error("failed to start gateway: {0}")]
    StartupFailed(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Policy(err) => {
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            GatewayError::Downstream(_) | GatewayError::StartupFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
