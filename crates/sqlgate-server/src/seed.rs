//! One-time sample data load run at startup.

use crate::config::SeedConfig;
use anyhow::Context;
use sqlgate_core::{DataFormat, Engine};

/// Recreate the sample table and load the CSV into it.
///
/// Failures are logged and swallowed so the gateway still starts.
pub async fn initial_migration(engine: &dyn Engine, seed: &SeedConfig) {
    match try_migration(engine, seed).await {
        Ok(()) => tracing::info!(table = %seed.table, "Database initialized with sample data"),
        Err(e) => tracing::error!(error = %format!("{:#}", e), "Error initializing database"),
    }
}

async fn try_migration(engine: &dyn Engine, seed: &SeedConfig) -> anyhow::Result<()> {
    let table = &seed.table;

    engine
        .command(&format!("DROP TABLE IF EXISTS {}", table))
        .await
        .context("drop sample table")?;

    engine
        .command(&format!(
            "CREATE TABLE {} (id UInt32, name String, age UInt32, city String) ENGINE MergeTree() ORDER BY (id)",
            table
        ))
        .await
        .context("create sample table")?;

    let values = tokio::fs::read(&seed.csv_path)
        .await
        .with_context(|| format!("read {:?}", seed.csv_path))?;

    engine
        .insert(table, values, DataFormat::Csv)
        .await
        .context("insert sample rows")?;

    Ok(())
}
