use sqlgate_clickhouse::ClickHouseFactory;
use sqlgate_server::{GatewayServer, load_config};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    let server = GatewayServer::new(config, Arc::new(ClickHouseFactory::new()));

    if let Err(e) = server.run().await {
        tracing::error!(error = %e, "Failed to start the application");
        return Err(e.into());
    }

    Ok(())
}
