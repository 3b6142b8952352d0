//! # sqlgate-clickhouse
//!
//! [`Engine`](sqlgate_core::Engine) implementation over the ClickHouse HTTP
//! interface.
//!
//! Every handle owns its own `reqwest::Client` whose default headers are the
//! `x-clickhouse-*` headers projected from the inbound request, so nothing
//! set by one caller can reach another caller's statements.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `command` | `POST /` with the SQL as body |
//! | `query`   | `POST /?default_format=<fmt>` with the SQL as body, rows decoded line by line |
//! | `insert`  | `POST /?query=INSERT INTO <table> FORMAT <fmt>` with the data as body |

pub mod client;
pub mod error;

pub use client::{ClickHouseClient, ClickHouseFactory};
pub use error::ClickHouseError;
