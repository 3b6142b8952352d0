//! `sqlgate run` - validate SQL text, execute it through the gateway, print results.

use crate::client::{Batch, ClientConfig, submit};
use anyhow::Result;
use serde_json::Value;
use sqlgate_core::Row;

/// Execute `sql` and print either every result set or a single error message.
pub async fn run(config: &ClientConfig, sql: &str, json: bool) -> Result<()> {
    let batch = submit(config, sql).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&batch.results)?);
    } else {
        print!("{}", render_batch(&batch));
    }

    Ok(())
}

/// Human-readable rendering of a whole submission.
pub fn render_batch(batch: &Batch) -> String {
    let mut out = String::new();
    for (idx, rows) in batch.results.iter().enumerate() {
        out.push_str(&format!("{} Query\n", idx + 1));
        if let Some(statement) = batch.statements.get(idx) {
            out.push_str(&format!("  {};\n", statement));
        }
        out.push('\n');
        if rows.is_empty() {
            out.push_str("Query executed successfully (0 rows returned)\n");
        } else {
            out.push_str(&render_table(rows));
        }
        out.push('\n');
    }
    out
}

/// Aligned text table; columns come from the first row.
fn render_table(rows: &[Row]) -> String {
    let columns: Vec<&String> = match rows.first() {
        Some(first) => first.keys().collect(),
        None => return String::new(),
    };

    let headers: Vec<String> = columns.iter().map(|c| capitalize(c)).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| row.get(c.as_str()).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format_line(&headers, &widths));
    out.push_str(&format_line(
        &widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>(),
        &widths,
    ));
    for row in &cells {
        out.push_str(&format_line(row, &widths));
    }
    out
}

fn format_line(values: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = values
        .iter()
        .zip(widths)
        .map(|(v, w)| format!("{:<width$}", v, width = *w))
        .collect();
    format!("{}\n", padded.join(" | ").trim_end())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn cell_text(value: &Value) -> String {
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

    fn rows(value: Value) -> Vec<Row> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_render_rows() {
        let batch = Batch {
            statements: vec!["SELECT * FROM test".into()],
            results: vec![rows(json!([
                { "id": 1, "name": "Test" },
                { "id": 2, "name": "Test 2" }
            ]))],
        };

        assert_eq!(
            render_batch(&batch),
            "1 Query\n  SELECT * FROM test;\n\nId | Name\n-- | ------\n1  | Test\n2  | Test 2\n\n"
        );
    }

    #[test]
    fn test_render_keeps_column_order() {
        let batch = Batch {
            statements: vec!["SELECT name, city, age FROM people".into()],
            results: vec![rows(json!([{ "name": "Alice", "city": "Paris", "age": 30 }]))],
        };

        let out = render_batch(&batch);
        assert!(out.contains("Name  | City  | Age\n"));
        assert!(out.contains("Alice | Paris | 30\n"));
    }

    #[test]
    fn test_render_empty_result() {
        let batch = Batch {
            statements: vec!["SELECT * FROM test".into()],
            results: vec![Vec::new()],
        };

        let out = render_batch(&batch);
        assert!(out.starts_with("1 Query\n"));
        assert!(out.contains("Query executed successfully (0 rows returned)"));
    }

    #[test]
    fn test_render_numbers_each_statement() {
        let batch = Batch {
            statements: vec!["SELECT 1".into(), "SELECT 2".into()],
            results: vec![Vec::new(), Vec::new()],
        };

        let out = render_batch(&batch);
        assert!(out.contains("1 Query\n  SELECT 1;"));
        assert!(out.contains("2 Query\n  SELECT 2;"));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!("plain")), "plain");
        assert_eq!(cell_text(&json!(null)), "null");
        assert_eq!(cell_text(&json!(true)), "true");
        assert_eq!(cell_text(&json!(4.5)), "4.5");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("city"), "City");
        assert_eq!(capitalize(""), "");
    }
}
