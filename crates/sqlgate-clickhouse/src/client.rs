//! ClickHouse HTTP client.

use crate::error::ClickHouseError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use sqlgate_core::{
    DataFormat, Engine, EngineError, EngineFactory, EngineTarget, ProjectedHeaders, QueryResult,
    Row,
};

/// A request-scoped connection to ClickHouse.
#[derive(Debug)]
pub struct ClickHouseClient {
    http: reqwest::Client,
    url: String,
}

impl ClickHouseClient {
    /// Build a client that sends `target.http_headers` with every request.
    pub fn new(target: EngineTarget) -> Result<Self, ClickHouseError> {
        let headers = to_header_map(&target.http_headers)?;
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ClickHouseError::Build)?;

        Ok(Self {
            http,
            url: target.url,
        })
    }

    async fn post(
        &self,
        params: &[(&str, &str)],
        body: impl Into<reqwest::Body>,
    ) -> Result<String, ClickHouseError> {
        let query_id = uuid::Uuid::new_v4().to_string();
        let response = self
            .http
            .post(&self.url)
            .query(&[("query_id", query_id.as_str())])
            .query(params)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(%query_id, status = status.as_u16(), "ClickHouse returned an error");
            return Err(ClickHouseError::Server {
                status: status.as_u16(),
                message: text.trim().to_string(),
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl Engine for ClickHouseClient {
    async fn command(&self, sql: &str) -> Result<(), EngineError> {
        self.post(&[], sql.to_string()).await?;
        Ok(())
    }

    async fn query(&self, sql: &str, format: DataFormat) -> Result<QueryResult, EngineError> {
        if format != DataFormat::JsonEachRow {
            return Err(ClickHouseError::UnsupportedFormat(format.as_str()).into());
        }

        let text = self
            .post(&[("default_format", format.as_str())], sql.to_string())
            .await?;
        Ok(decode_json_each_row(&text)?)
    }

    async fn insert(
        &self,
        table: &str,
        values: Vec<u8>,
        format: DataFormat,
    ) -> Result<(), EngineError> {
        let statement = format!("INSERT INTO {} FORMAT {}", table, format.as_str());
        self.post(&[("query", statement.as_str())], values).await?;
        Ok(())
    }
}

/// Builds a fresh [`ClickHouseClient`] for every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickHouseFactory;

impl ClickHouseFactory {
    pub fn new() -> Self {
        Self
    }
}

impl EngineFactory for ClickHouseFactory {
    fn connect(&self, target: EngineTarget) -> Result<Box<dyn Engine>, EngineError> {
        Ok(Box::new(ClickHouseClient::new(target)?))
    }
}

fn to_header_map(headers: &ProjectedHeaders) -> Result<HeaderMap, ClickHouseError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ClickHouseError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| ClickHouseError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

fn decode_json_each_row(text: &str) -> Result<QueryResult, ClickHouseError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<Row>(line).map_err(|source| ClickHouseError::Decode {
                line: idx + 1,
                source,
            })
        })
        .collect()
}
