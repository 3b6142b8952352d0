//! Route definitions and middleware stack.

use crate::config::ServerConfig;
use crate::gateway::QueryGateway;
use crate::headers::forwarded_headers;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use sqlgate_core::ExecutionResponse;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Forwarded headers a browser may send cross-origin.
const CORS_CLICKHOUSE_HEADERS: &[&str] = &[
    "x-clickhouse-user",
    "x-clickhouse-key",
    "x-clickhouse-database",
    "x-clickhouse-format",
    "x-clickhouse-quota",
];

/// Body of `POST /query`.
#[derive(Debug, Default, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// HTTP rendering of an [`ExecutionResponse`].
pub struct QueryReply(pub ExecutionResponse);

impl IntoResponse for QueryReply {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0.into_body())).into_response()
    }
}

/// Create the gateway router.
pub fn create_router(gateway: Arc<QueryGateway>, server: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/query", post(query))
        .with_state(gateway)
        .layer(cors_layer(&server.cors_origins))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("cross-origin-resource-policy"),
            HeaderValue::from_static("cross-origin"),
        ))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let mut allowed_headers = vec![header::CONTENT_TYPE];
    allowed_headers.extend(
        CORS_CLICKHOUSE_HEADERS
            .iter()
            .copied()
            .map(HeaderName::from_static),
    );

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(allowed_headers)
        .allow_credentials(true)
}

async fn root() -> &'static str {
    "Hello world!"
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn query(
    State(gateway): State<Arc<QueryGateway>>,
    headers: HeaderMap,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> QueryReply {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable query body");
            QueryRequest::default()
        }
    };

    let projected = forwarded_headers(&headers);
    QueryReply(gateway.execute(request.query.as_deref(), projected).await)
}
