mod client;
mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use client::ClientConfig;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sqlgate", version, about = "sqlgate CLI")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate SQL text and execute each statement through the gateway.
    Run {
        #[command(flatten)]
        input: SqlInput,

        /// Gateway base URL, e.g. http://localhost:8080
        #[arg(long, env = "SQLGATE_API_URL")]
        api_url: Option<String>,

        /// Give up on a statement after this many seconds (default: wait forever)
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Print raw JSON result sets instead of tables
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Check SQL text locally without executing it.
    Validate {
        #[command(flatten)]
        input: SqlInput,
    },
}

#[derive(clap::Args, Debug)]
struct SqlInput {
    /// SQL text; statements separated by semicolons. Read from stdin when omitted.
    sql: Option<String>,

    /// Read SQL text from a file instead
    #[arg(long, short, conflicts_with = "sql")]
    file: Option<PathBuf>,
}

impl SqlInput {
    fn read(self) -> anyhow::Result<String> {
        if let Some(sql) = self.sql {
            return Ok(sql);
        }
        if let Some(path) = self.file {
            return std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read SQL file {:?}", path));
        }
        let mut sql = String::new();
        std::io::stdin()
            .read_to_string(&mut sql)
            .context("Failed to read SQL from stdin")?;
        Ok(sql)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Run {
            input,
            api_url,
            timeout_secs,
            json,
        } => {
            let config = ClientConfig {
                api_url,
                timeout: timeout_secs.map(Duration::from_secs),
            };
            commands::run::run(&config, &input.read()?, json).await?
        }
        Command::Validate { input } => commands::validate::run(&input.read()?)?,
    }

    Ok(())
}
