use crate::error::RecommendationResult;

/// Qdrant connection configuration
#[derive(Debug, Clone)]
pub struct QdrantIndexConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub collection: String,
    pub timeout_secs: u64,
}

impl QdrantIndexConfig {
    pub fn new(url: String, collection: String) -> Self {
        Self {
            url,
            api_key: None,
            collection,
            timeout_secs: 30,
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn from_env() -> RecommendationResult<Self> {
        let url =
            std::env::var("QDRANT_URL").unwrap_or_else(|_| "http://localhost:6334".to_string());

        let api_key = std::env::var("QDRANT_API_KEY").ok();

        let collection = std::env::var("QDRANT_COLLECTION")
            .unwrap_or_else(|_| "video_embeddings".to_string());

        let timeout_secs = std::env::var("QDRANT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            url,
            api_key,
            collection,
            timeout_secs,
        })
    }
}

impl Default for QdrantIndexConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:6334".to_string(),
            api_key: None,
            collection: "video_embeddings".to_string(),
            timeout_secs: 30,
        }
    }
}
