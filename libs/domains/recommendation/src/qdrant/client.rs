use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{Condition, Filter, ScoredPoint, SearchPointsBuilder};
use qdrant_client::Qdrant;

use super::QdrantIndexConfig;
use crate::error::{RecommendationError, RecommendationResult};
use crate::index::SimilarityIndex;

/// Payload field holding the canonical content id for each point.
///
/// Content ids are arbitrary URIs, which are not valid Qdrant point ids,
/// so the id lives in the payload and exclusion filters match on it.
const CONTENT_ID_FIELD: &str = "content_id";

/// Qdrant-backed implementation of SimilarityIndex
pub struct QdrantIndex {
    client: Qdrant,
    collection: String,
}

impl QdrantIndex {
    pub async fn new(config: QdrantIndexConfig) -> RecommendationResult<Self> {
        let mut builder = Qdrant::from_url(&config.url);

        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }

        builder = builder.timeout(Duration::from_secs(config.timeout_secs));

        let client = builder
            .build()
            .map_err(|e| RecommendationError::Index(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            collection: config.collection,
        })
    }

    pub fn from_client(client: Qdrant, collection: impl Into<String>) -> Self {
        Self {
            client,
            collection: collection.into(),
        }
    }

    fn point_content_id(point: ScoredPoint) -> RecommendationResult<String> {
        match point.payload.get(CONTENT_ID_FIELD).map(|v| &v.kind) {
            Some(Some(Kind::StringValue(s))) => Ok(s.clone()),
            _ => Err(RecommendationError::Internal(format!(
                "Point is missing a string `{CONTENT_ID_FIELD}` payload field"
            ))),
        }
    }
}

#[async_trait]
impl SimilarityIndex for QdrantIndex {
    async fn query(
        &self,
        vector: &[f32],
        top_k: u32,
        exclude: &HashSet<String>,
    ) -> RecommendationResult<Vec<String>> {
        let mut builder =
            SearchPointsBuilder::new(&self.collection, vector.to_vec(), top_k as u64)
                .with_payload(true);

        if !exclude.is_empty() {
            let excluded: Vec<String> = exclude.iter().cloned().collect();
            builder = builder.filter(Filter::must_not([Condition::matches(
                CONTENT_ID_FIELD,
                excluded,
            )]));
        }

        let results = self.client.search_points(builder).await?;

        results
            .result
            .into_iter()
            .map(Self::point_content_id)
            .collect()
    }
}
