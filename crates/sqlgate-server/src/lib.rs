//! # sqlgate-server
//!
//! HTTP gateway that executes single SQL statements against ClickHouse.
//!
//! ## Endpoints
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | `200 Hello world!` |
//! | `GET /api/health` | `204` |
//! | `POST /query` | `200 {rows}`, `400`/`403`/`500 {error}` |
//!
//! Each `/query` request is checked against the keyword deny-list, then run
//! on an engine handle built just for that request from the configured
//! ClickHouse URL and the caller's `x-clickhouse-*` headers.

pub mod config;
pub mod error;
pub mod gateway;
pub mod headers;
pub mod routes;
pub mod seed;
pub mod server;

pub use config::{AppConfig, load_config};
pub use error::GatewayError;
pub use gateway::{GatewayConfig, QueryGateway};
pub use server::GatewayServer;
