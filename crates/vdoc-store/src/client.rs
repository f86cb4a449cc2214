//! GridDB Web API client.
//!
//! Documentary metadata lives in one collection container with the
//! fixed schema `(id LONG, video STRING, audio STRING, narrative
//! STRING, title STRING)`. All access goes through the GridDB Web API
//! over HTTP with basic auth.

use std::time::Duration;

use rand::Rng;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use vdoc_models::{DocumentaryMetadata, NewDocumentary};

use crate::error::{StoreError, StoreResult};

/// GridDB client configuration.
#[derive(Debug, Clone)]
pub struct GridDbConfig {
    /// Web API base URL, e.g. `http://localhost:8081/griddb/v2/myCluster/dbs/public`
    pub base_url: String,
    /// Basic auth username
    pub username: String,
    /// Basic auth password
    pub password: String,
    /// Collection container name
    pub container: String,
    /// Request timeout
    pub timeout: Duration,
}

impl GridDbConfig {
    /// Create config from environment variables.
    pub fn from_env() -> StoreResult<Self> {
        let base_url = std::env::var("GRIDDB_WEBAPI_URL")
            .map_err(|_| StoreError::config_error("GRIDDB_WEBAPI_URL not set"))?;
        if base_url.is_empty() {
            return Err(StoreError::config_error("GRIDDB_WEBAPI_URL cannot be empty"));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: std::env::var("GRIDDB_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            password: std::env::var("GRIDDB_PASSWORD").unwrap_or_else(|_| "admin".to_string()),
            container: std::env::var("GRIDDB_CONTAINER")
                .unwrap_or_else(|_| "documentaries".to_string()),
            timeout: Duration::from_secs(
                std::env::var("GRIDDB_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        })
    }
}

/// Row acquisition response.
#[derive(Debug, Deserialize)]
struct RowsResponse {
    #[serde(default)]
    rows: Vec<Vec<Value>>,
}

/// GridDB Web API client.
#[derive(Debug, Clone)]
pub struct GridDbClient {
    http: Client,
    config: GridDbConfig,
}

impl GridDbClient {
    /// Create a new client.
    pub fn new(config: GridDbConfig) -> StoreResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(StoreError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> StoreResult<Self> {
        Self::new(GridDbConfig::from_env()?)
    }

    /// Create the metadata container when it does not exist yet.
    ///
    /// Safe to call on every startup; an already-existing container is
    /// not an error.
    pub async fn ensure_container(&self) -> StoreResult<()> {
        let url = format!("{}/containers", self.config.base_url);
        let body = json!({
            "container_name": &self.config.container,
            "container_type": "COLLECTION",
            "rowkey": true,
            "columns": [
                {"name": "id", "type": "LONG"},
                {"name": "video", "type": "STRING"},
                {"name": "audio", "type": "STRING"},
                {"name": "narrative", "type": "STRING"},
                {"name": "title", "type": "STRING"}
            ]
        });

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::unavailable(e.to_string()))?;

        match response.status() {
            s if s.is_success() => {
                info!(container = %self.config.container, "Container created");
                Ok(())
            }
            StatusCode::CONFLICT => {
                debug!(container = %self.config.container, "Container already exists");
                Ok(())
            }
            s => {
                let body = response.text().await.unwrap_or_default();
                Err(StoreError::RequestFailed {
                    status: s.as_u16(),
                    body,
                })
            }
        }
    }

    /// Persist one documentary record, assigning a fresh id.
    pub async fn save_documentary(
        &self,
        record: NewDocumentary,
    ) -> StoreResult<DocumentaryMetadata> {
        let record = record.with_id(generate_id());
        let url = format!(
            "{}/containers/{}/rows",
            self.config.base_url, self.config.container
        );
        let rows = json!([[
            record.id,
            &record.video,
            &record.audio,
            &record.narrative,
            &record.title
        ]]);

        let response = self
            .http
            .put(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(&rows)
            .send()
            .await
            .map_err(|e| StoreError::unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::insert_rejected(format!("{status}: {body}")));
        }

        info!(id = record.id, title = %record.title, "Documentary metadata saved");
        Ok(record)
    }

    /// Fetch one record by id.
    pub async fn get_documentary(&self, id: i64) -> StoreResult<Option<DocumentaryMetadata>> {
        let body = json!({
            "offset": 0,
            "limit": 1,
            "condition": format!("id == {id}")
        });
        let mut rows = self.fetch_rows(&body).await?;
        match rows.pop() {
            Some(row) => Ok(Some(row_to_metadata(&row)?)),
            None => Ok(None),
        }
    }

    /// Fetch all records.
    pub async fn list_documentaries(&self) -> StoreResult<Vec<DocumentaryMetadata>> {
        let body = json!({
            "offset": 0,
            "limit": 10_000
        });
        let rows = self.fetch_rows(&body).await?;
        rows.iter().map(|row| row_to_metadata(row)).collect()
    }

    async fn fetch_rows(&self, body: &Value) -> StoreResult<Vec<Vec<Value>>> {
        let url = format!(
            "{}/containers/{}/rows",
            self.config.base_url, self.config.container
        );

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::RequestFailed { status, body });
        }

        let rows: RowsResponse = response.json().await?;
        Ok(rows.rows)
    }
}

/// Draw a record id from a space large enough that collision is
/// negligible; uniqueness stays probabilistic, the container's rowkey
/// rejects the pathological duplicate.
fn generate_id() -> i64 {
    rand::rng().random_range(1..i64::MAX)
}

fn row_to_metadata(row: &[Value]) -> StoreResult<DocumentaryMetadata> {
    if row.len() != 5 {
        return Err(StoreError::invalid_response(format!(
            "Expected 5 columns, got {}",
            row.len()
        )));
    }

    let id = row[0]
        .as_i64()
        .ok_or_else(|| StoreError::invalid_response("id column is not an integer"))?;
    let text = |index: usize, name: &str| -> StoreResult<String> {
        row[index]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| StoreError::invalid_response(format!("{name} column is not a string")))
    };

    Ok(DocumentaryMetadata {
        id,
        video: text(1, "video")?,
        audio: text(2, "audio")?,
        narrative: text(3, "narrative")?,
        title: text(4, "title")?,
    })
}
