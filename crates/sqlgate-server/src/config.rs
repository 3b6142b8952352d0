use crate::gateway::GatewayConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlgate_core::DEFAULT_CLICKHOUSE_URL;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Names the config file to load.
pub const CONFIG_PATH_ENV: &str = "SQLGATE_CONFIG";

/// Overrides `clickhouse.url` when set and non-empty.
pub const CLICKHOUSE_URL_ENV: &str = "CLICKHOUSE_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub clickhouse: ClickHouseConfig,
    /// Sample data loaded once at startup. Absent means no seeding.
    #[serde(default)]
    pub seed: Option<SeedConfig>,
}

impl AppConfig {
    /// Apply environment overrides, reading variables through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(CLICKHOUSE_URL_ENV).filter(|u| !u.is_empty()) {
            self.clickhouse.url = url;
        }
    }

    pub fn gateway(&self) -> GatewayConfig {
        GatewayConfig {
            clickhouse_url: self.clickhouse.url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:8080"
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Browser origins allowed by CORS.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
        "http://localhost:4173".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_origins: default_cors_origins(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickHouseConfig {
    #[serde(default = "default_clickhouse_url")]
    pub url: String,
}

fn default_clickhouse_url() -> String {
    DEFAULT_CLICKHOUSE_URL.to_string()
}

impl Default for ClickHouseConfig {
    fn default() -> Self {
        Self {
            url: default_clickhouse_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_seed_table")]
    pub table: String,

    /// CSV file with `id, name, age, city` rows.
    pub csv_path: PathBuf,
}

fn default_seed_table() -> String {
    "example_data_csv".to_string()
}

/// Load the config named by `SQLGATE_CONFIG` (default `sqlgate.toml`) and
/// apply environment overrides.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let lookup = |key: &str| env::var(key).ok();
    let path = config_path(&lookup);
    load_from(&path, lookup)
}

/// Load from `path`; a missing file yields the defaults.
pub fn load_from(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<AppConfig> {
    let mut cfg = if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&raw).with_context(|| format!("Invalid config file {:?}", path))?
    } else {
        tracing::debug!(path = ?path, "Config file not found, using defaults");
        AppConfig::default()
    };

    cfg.apply_env(lookup);
    Ok(cfg)
}

fn config_path(lookup: &impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(p) = lookup(CONFIG_PATH_ENV) {
        return PathBuf::from(p);
    }
    PathBuf::from("sqlgate.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_from(&dir.path().join("missing.toml"), no_env).unwrap();

        assert_eq!(cfg.server.bind, "0.0.0.0:8080");
        assert_eq!(cfg.clickhouse.url, "http://localhost:8123");
        assert_eq!(cfg.server.cors_origins.len(), 3);
        assert!(cfg.seed.is_none());
    }

    #[test]
    fn test_load_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
bind = "127.0.0.1:9000"

[clickhouse]
url = "http://clickhouse:8123"

[seed]
csv_path = "data/example.csv"
"#
        )
        .unwrap();

        let cfg = load_from(file.path(), no_env).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:9000");
        assert_eq!(cfg.clickhouse.url, "http://clickhouse:8123");

        let seed = cfg.seed.unwrap();
        assert_eq!(seed.table, "example_data_csv");
        assert_eq!(seed.csv_path, PathBuf::from("data/example.csv"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nbind = ").unwrap();
        assert!(load_from(file.path(), no_env).is_err());
    }

    #[test]
    fn test_env_overrides_url() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_from(&dir.path().join("missing.toml"), |key| {
            (key == CLICKHOUSE_URL_ENV).then(|| "http://ch.internal:8123".to_string())
        })
        .unwrap();
        assert_eq!(cfg.gateway().clickhouse_url, "http://ch.internal:8123");
    }

    #[test]
    fn test_empty_env_url_is_ignored() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(|_| Some(String::new()));
        assert_eq!(cfg.clickhouse.url, DEFAULT_CLICKHOUSE_URL);
    }
}
