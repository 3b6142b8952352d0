//! Client side of the gateway: pre-flight validation and concurrent submission.
//!
//! A submission is all-or-nothing. Every statement is posted at once and the
//! batch fails as soon as any one of them fails; results of statements that
//! already succeeded are discarded.

use futures::future::try_join_all;
use sqlgate_core::{
    CLIENT_FALLBACK_MESSAGE, FailureInfo, QueryResult, ResponseBody, ValidationError, split,
    validate,
};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the gateway base URL.
pub const API_URL_ENV: &str = "SQLGATE_API_URL";

/// Shown to the user when no gateway URL is configured.
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Unable to connect to the server. Please try again later or contact support.";

/// Client settings resolved once at startup.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Gateway base URL. `None` or empty means unconfigured.
    pub api_url: Option<String>,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    fn base_url(&self) -> Option<&str> {
        self.api_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Errors surfaced to the user; each renders as a single message.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Pre-flight validation failed; nothing was sent.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// No gateway URL; nothing was sent.
    #[error("{}", CONNECTION_ERROR_MESSAGE)]
    NotConfigured,

    /// A statement failed; holds the resolved message.
    #[error("{0}")]
    Request(String),
}

/// Statements of one submission with their results, index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub statements: Vec<String>,
    pub results: Vec<QueryResult>,
}

/// HTTP client for `POST /query`.
pub struct ApiClient {
    http: reqwest::Client,
    query_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let Some(base_url) = config.base_url() else {
            tracing::error!(
                "API URL is not configured. Please set {} environment variable.",
                API_URL_ENV
            );
            return Err(ClientError::NotConfigured);
        };

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Request(e.to_string()))?;

        Ok(Self {
            http,
            query_url: format!("{}/query", base_url.trim_end_matches('/')),
        })
    }

    /// Submit one statement.
    pub async fn execute(&self, statement: &str) -> Result<QueryResult, FailureInfo> {
        let response = self
            .http
            .post(&self.query_url)
            .json(&serde_json::json!({ "query": statement }))
            .send()
            .await
            .map_err(|e| FailureInfo::Message(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| FailureInfo::Message(e.to_string()))?;
        let parsed = serde_json::from_slice::<ResponseBody>(&body);

        match (status.is_success(), parsed) {
            (true, Ok(ResponseBody::Rows { rows })) => Ok(rows),
            (_, Ok(ResponseBody::Error { error })) => Err(FailureInfo::Payload(error)),
            (true, Err(e)) => Err(FailureInfo::Message(format!("invalid response body: {}", e))),
            (false, _) => Err(FailureInfo::Message(format!(
                "Request failed with status code {}",
                status.as_u16()
            ))),
        }
    }

    /// Submit every statement concurrently; results keep input order.
    pub async fn execute_all(&self, statements: &[String]) -> Result<Vec<QueryResult>, ClientError> {
        try_join_all(statements.iter().map(|s| self.execute(s)))
            .await
            .map_err(|info| {
                let message = info.resolve(CLIENT_FALLBACK_MESSAGE);
                tracing::error!(error = %message, "Query execution failed");
                ClientError::Request(message)
            })
    }
}

/// Validate, split and execute raw SQL text.
///
/// Validation and configuration problems are reported before any request is made.
pub async fn submit(config: &ClientConfig, raw: &str) -> Result<Batch, ClientError> {
    validate(raw)?;
    let statements = split(raw);

    let client = ApiClient::new(config)?;
    let results = client.execute_all(&statements).await?;

    Ok(Batch {
        statements,
        results,
    })
}
