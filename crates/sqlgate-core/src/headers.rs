//! Projection of inbound request headers onto the set forwarded downstream.

use serde_json::Value;
use std::borrow::Borrow;
use std::collections::BTreeMap;

/// Only headers whose name starts with this prefix are forwarded.
pub const FORWARDED_HEADER_PREFIX: &str = "x-clickhouse-";

/// Separator used when a header carries several values.
pub const VALUE_SEPARATOR: &str = ", ";

/// Header name to single flattened value.
pub type ProjectedHeaders = BTreeMap<String, String>;

/// Keep the `x-clickhouse-` headers and flatten their values.
///
/// The prefix match is case-sensitive. Values are flattened as follows:
/// - strings pass through unchanged
/// - arrays are joined with `", "` in order (an empty array becomes `""`)
/// - `null` becomes the literal `"null"` rather than being dropped
/// - any other value uses its JSON text
pub fn project<K, V, I>(headers: I) -> ProjectedHeaders
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Borrow<Value>,
{
    headers
        .into_iter()
        .filter(|(name, _)| name.as_ref().starts_with(FORWARDED_HEADER_PREFIX))
        .map(|(name, value)| (name.as_ref().to_string(), flatten(value.borrow())))
        .collect()
}

fn flatten(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(VALUE_SEPARATOR),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn expected(pairs: &[(&str, &str)]) -> ProjectedHeaders {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_extracts_clickhouse_headers() {
        let inbound = vec![
            ("x-clickhouse-format", json!("JSON")),
            ("x-clickhouse-user", json!("default")),
            ("content-type", json!("application/json")),
            ("x-clickhouse-quota", json!(["quota1", "quota2"])),
        ];

        assert_eq!(
            project(inbound),
            expected(&[
                ("x-clickhouse-format", "JSON"),
                ("x-clickhouse-user", "default"),
                ("x-clickhouse-quota", "quota1, quota2"),
            ])
        );
    }

    #[test]
    fn test_no_clickhouse_headers() {
        let inbound = vec![
            ("content-type", json!("application/json")),
            ("x-test", json!("test")),
        ];
        assert!(project(inbound).is_empty());
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let inbound = vec![("X-ClickHouse-User", json!("default"))];
        assert!(project(inbound).is_empty());
    }

    #[test]
    fn test_non_string_values_are_stringified() {
        let inbound = vec![
            ("x-clickhouse-numeric", json!(12345)),
            ("x-clickhouse-multiple", Value::Null),
            ("x-clickhouse-flag", json!(true)),
            ("x-clickhouse-settings", json!([])),
        ];

        assert_eq!(
            project(inbound),
            expected(&[
                ("x-clickhouse-numeric", "12345"),
                ("x-clickhouse-multiple", "null"),
                ("x-clickhouse-flag", "true"),
                ("x-clickhouse-settings", ""),
            ])
        );
    }

    #[test]
    fn test_array_order_is_preserved() {
        let values = json!(["value1", "value2", "value3"]);
        let projected = project([("x-clickhouse-multiple", &values)]);
        assert_eq!(projected["x-clickhouse-multiple"], "value1, value2, value3");
    }
}
