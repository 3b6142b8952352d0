//! # sqlgate-core
//!
//! Shared building blocks for the sqlgate gateway and its client:
//!
//! - [`statement::split`] turns raw multi-statement SQL into trimmed statements
//! - [`validate::validate`] performs the advisory leading-command check
//! - [`headers::project`] filters inbound headers down to the `x-clickhouse-` family
//! - [`engine`] describes the downstream analytical database capability
//! - [`response`] holds the uniform success/failure shapes and message resolution
//!
//! ## Request flow
//!
//! ```text
//! raw SQL ──► validate ──► split ──► one POST /query per statement
//!                                          │
//!                                          ▼
//!                             deny-list ─► project headers ─► Engine
//! ```

pub mod engine;
pub mod headers;
pub mod response;
pub mod statement;
pub mod validate;

pub use engine::{
    DEFAULT_CLICKHOUSE_URL, DataFormat, Engine, EngineError, EngineFactory, EngineTarget,
};
pub use headers::{FORWARDED_HEADER_PREFIX, ProjectedHeaders, project};
pub use response::{
    CLIENT_FALLBACK_MESSAGE, ExecutionResponse, FailureInfo, QueryResult, ResponseBody, Row,
    SERVER_FALLBACK_MESSAGE,
};
pub use statement::split;
pub use validate::{ValidationError, ValidationErrorKind, validate};
