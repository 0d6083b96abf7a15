use async_trait::async_trait;

use crate::error::RecommendationResult;
use crate::models::EmbeddingRecord;

/// Read-side access to the embedding warehouse.
///
/// Implementations resolve content ids to their stored embedding vectors.
/// Ids with no stored embedding are simply absent from the result; the
/// returned order is unspecified.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingStore: Send + Sync {
    async fn fetch_embeddings(
        &self,
        content_ids: &[String],
    ) -> RecommendationResult<Vec<EmbeddingRecord>>;
}
