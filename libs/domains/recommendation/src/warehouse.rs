use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RecommendationError, RecommendationResult};
use crate::models::EmbeddingRecord;
use crate::store::EmbeddingStore;

/// Configuration for the embedding warehouse HTTP API.
#[derive(Debug, Clone)]
pub struct WarehouseConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl WarehouseConfig {
    /// Reads configuration from environment variables:
    /// - `EMBEDDING_WAREHOUSE_URL` (required)
    /// - `EMBEDDING_WAREHOUSE_API_KEY` (optional)
    /// - `EMBEDDING_WAREHOUSE_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> RecommendationResult<Self> {
        let base_url = std::env::var("EMBEDDING_WAREHOUSE_URL").map_err(|_| {
            RecommendationError::Config("EMBEDDING_WAREHOUSE_URL must be set".to_string())
        })?;

        let api_key = std::env::var("EMBEDDING_WAREHOUSE_API_KEY").ok();

        let timeout_secs = std::env::var("EMBEDDING_WAREHOUSE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            base_url,
            api_key,
            timeout_secs,
        })
    }
}

#[derive(Debug, Serialize)]
struct LookupRequest<'a> {
    content_ids: &'a [String],
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    records: Vec<EmbeddingRecord>,
}

/// `EmbeddingStore` backed by the warehouse lookup endpoint.
pub struct WarehouseClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl WarehouseClient {
    pub fn new(config: WarehouseConfig) -> RecommendationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                RecommendationError::Config(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }
}

#[async_trait]
impl EmbeddingStore for WarehouseClient {
    async fn fetch_embeddings(
        &self,
        content_ids: &[String],
    ) -> RecommendationResult<Vec<EmbeddingRecord>> {
        if content_ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/v1/embeddings/lookup", self.base_url);
        let mut request = self.client.post(&url).json(&LookupRequest { content_ids });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RecommendationError::Warehouse(format!(
                "Lookup returned {status}: {body}"
            )));
        }

        let lookup: LookupResponse = response.json().await?;
        debug!(
            requested = content_ids.len(),
            returned = lookup.records.len(),
            "Fetched embeddings from warehouse"
        );
        Ok(lookup.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = WarehouseClient::new(WarehouseConfig {
            base_url: "http://warehouse.internal/".to_string(),
            api_key: None,
            timeout_secs: 30,
        })
        .unwrap();
        assert_eq!(client.base_url, "http://warehouse.internal");
    }

    #[test]
    fn test_lookup_response_deserializes_records() {
        let json = r#"{
            "records": [
                {"content_id": "gs://videos/a.mp4", "embedding": [0.1, 0.2]},
                {"content_id": "gs://videos/b.mp4", "embedding": [0.3], "metadata": {"lang": "en"}}
            ]
        }"#;
        let parsed: LookupResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].content_id, "gs://videos/a.mp4");
        assert!(parsed.records[1].metadata.is_some());
    }

    #[tokio::test]
    async fn test_empty_id_list_skips_the_network() {
        // No server is running at this address; an empty request must not
        // reach it.
        let client = WarehouseClient::new(WarehouseConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: None,
            timeout_secs: 1,
        })
        .unwrap();
        let records = client.fetch_embeddings(&[]).await.unwrap();
        assert!(records.is_empty());
    }
}
