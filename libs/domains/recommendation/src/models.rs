use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RecommendationError, RecommendationResult};

/// One row from the embedding warehouse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub content_id: String,
    pub embedding: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl EmbeddingRecord {
    pub fn new(content_id: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            content_id: content_id.into(),
            embedding,
            metadata: None,
        }
    }

    /// Whether this record is eligible for retrieval at the given dimension.
    pub fn has_dimension(&self, dimension: usize) -> bool {
        self.embedding.len() == dimension
    }
}

/// Retrieval hyper-parameters.
#[derive(Debug, Clone, Copy)]
pub struct EngineParams {
    /// Expected embedding dimension; records of any other size are dropped.
    pub embedding_dimension: usize,
    /// How many seed embeddings to query per request.
    pub sample_size: usize,
    /// Result cap per similarity query.
    pub top_k: u32,
}

impl EngineParams {
    pub fn with_embedding_dimension(mut self, dimension: usize) -> Self {
        self.embedding_dimension = dimension;
        self
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    /// Reads overrides from the environment:
    /// - `RECSYS_EMBEDDING_DIMENSION` (default: 1408)
    /// - `RECSYS_SAMPLE_SIZE` (default: 5)
    /// - `RECSYS_TOP_K` (default: 10)
    ///
    /// Unset variables fall back to the defaults; values that fail to
    /// parse are a configuration error.
    pub fn from_env() -> RecommendationResult<Self> {
        let defaults = Self::default();

        Ok(Self {
            embedding_dimension: parse_env_or(
                "RECSYS_EMBEDDING_DIMENSION",
                defaults.embedding_dimension,
            )?,
            sample_size: parse_env_or("RECSYS_SAMPLE_SIZE", defaults.sample_size)?,
            top_k: parse_env_or("RECSYS_TOP_K", defaults.top_k)?,
        })
    }
}

fn parse_env_or<T>(key: &str, default: T) -> RecommendationResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| {
            RecommendationError::Config(format!("Failed to parse {key}: {e}"))
        }),
        Err(_) => Ok(default),
    }
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            embedding_dimension: 1408,
            sample_size: 5,
            top_k: 10,
        }
    }
}
