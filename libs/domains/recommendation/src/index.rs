use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::RecommendationResult;

/// Approximate nearest-neighbour lookup over the video corpus.
///
/// `exclude` is pushed down to the index so already-seen content never
/// occupies one of the `top_k` result slots.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SimilarityIndex: Send + Sync {
    async fn query(
        &self,
        vector: &[f32],
        top_k: u32,
        exclude: &HashSet<String>,
    ) -> RecommendationResult<Vec<String>>;
}
