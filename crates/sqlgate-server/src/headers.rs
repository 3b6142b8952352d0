//! Bridge from HTTP request headers to the forwarded header projection.

use axum::http::HeaderMap;
use serde_json::Value;
use sqlgate_core::{ProjectedHeaders, project};
use std::collections::BTreeMap;

/// Project the caller's headers onto those forwarded to ClickHouse.
///
/// A header sent several times is treated as a list and joined.
pub fn forwarded_headers(headers: &HeaderMap) -> ProjectedHeaders {
    let mut grouped: BTreeMap<&str, Vec<Value>> = BTreeMap::new();
    for (name, value) in headers {
        let text = String::from_utf8_lossy(value.as_bytes()).into_owned();
        grouped
            .entry(name.as_str())
            .or_default()
            .push(Value::String(text));
    }

    project(grouped.into_iter().map(|(name, mut values)| {
        let value = if values.len() == 1 {
            values.swap_remove(0)
        } else {
            Value::Array(values)
        };
        (name, value)
    }))
}
