use std::collections::HashSet;
use std::sync::Arc;

use futures::future;
use tracing::debug;

use crate::error::RecommendationResult;
use crate::index::SimilarityIndex;
use crate::models::EmbeddingRecord;

/// Fans out one similarity query per seed embedding and concatenates the
/// results in seed order.
///
/// The queries run concurrently and the first failure aborts the whole
/// batch; no partial candidate list is ever returned. A video surfaced by
/// several seeds appears once per seed.
pub struct CandidateRetriever<I: SimilarityIndex> {
    index: Arc<I>,
    top_k: u32,
}

impl<I: SimilarityIndex> CandidateRetriever<I> {
    pub fn new(index: Arc<I>, top_k: u32) -> Self {
        Self { index, top_k }
    }

    pub async fn retrieve(
        &self,
        seeds: &[EmbeddingRecord],
        exclude: &HashSet<String>,
    ) -> RecommendationResult<Vec<String>> {
        if seeds.is_empty() {
            return Ok(Vec::new());
        }

        let queries = seeds
            .iter()
            .map(|seed| self.index.query(&seed.embedding, self.top_k, exclude));
        let batches = future::try_join_all(queries).await?;

        // The index applies the exclusion filter; drop anything that still
        // slips through so seen content never reaches the caller.
        let candidates: Vec<String> = batches
            .into_iter()
            .flatten()
            .filter(|id| !exclude.contains(id))
            .collect();

        debug!(
            seeds = seeds.len(),
            candidates = candidates.len(),
            "Collected similarity candidates"
        );
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecommendationError;
    use crate::index::MockSimilarityIndex;

    fn seed(id: &str) -> EmbeddingRecord {
        EmbeddingRecord::new(id, vec![0.5; 4])
    }

    #[tokio::test]
    async fn test_results_concatenate_in_seed_order() {
        let mut index = MockSimilarityIndex::new();
        index
            .expect_query()
            .times(2)
            .returning(|vector, _, _| {
                let batch = if vector[0] < 0.0 {
                    vec!["a".to_string(), "b".to_string()]
                } else {
                    vec!["c".to_string()]
                };
                Ok(batch)
            });

        let retriever = CandidateRetriever::new(Arc::new(index), 10);
        let mut first = seed("s1");
        first.embedding = vec![-1.0; 4];
        let seeds = vec![first, seed("s2")];

        let candidates = retriever.retrieve(&seeds, &HashSet::new()).await.unwrap();
        assert_eq!(candidates, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_duplicates_across_seeds_are_preserved() {
        let mut index = MockSimilarityIndex::new();
        index
            .expect_query()
            .times(3)
            .returning(|_, _, _| Ok(vec!["popular".to_string()]));

        let retriever = CandidateRetriever::new(Arc::new(index), 10);
        let seeds = vec![seed("s1"), seed("s2"), seed("s3")];

        let candidates = retriever.retrieve(&seeds, &HashSet::new()).await.unwrap();
        assert_eq!(candidates, vec!["popular", "popular", "popular"]);
    }

    #[tokio::test]
    async fn test_one_failed_query_fails_the_batch() {
        let mut index = MockSimilarityIndex::new();
        index.expect_query().returning(|vector, _, _| {
            if vector[0] < 0.0 {
                Err(RecommendationError::Index("unavailable".to_string()))
            } else {
                Ok(vec!["x".to_string()])
            }
        });

        let retriever = CandidateRetriever::new(Arc::new(index), 10);
        let mut bad = seed("s2");
        bad.embedding = vec![-1.0; 4];
        let seeds = vec![seed("s1"), bad];

        let result = retriever.retrieve(&seeds, &HashSet::new()).await;
        assert!(matches!(result, Err(RecommendationError::Index(_))));
    }

    #[tokio::test]
    async fn test_excluded_ids_never_surface() {
        let mut index = MockSimilarityIndex::new();
        // A misbehaving index that ignores its exclusion filter.
        index
            .expect_query()
            .returning(|_, _, _| Ok(vec!["seen".to_string(), "fresh".to_string()]));

        let retriever = CandidateRetriever::new(Arc::new(index), 10);
        let exclude: HashSet<String> = ["seen".to_string()].into_iter().collect();

        let candidates = retriever.retrieve(&[seed("s1")], &exclude).await.unwrap();
        assert_eq!(candidates, vec!["fresh"]);
    }

    #[tokio::test]
    async fn test_no_seeds_no_queries() {
        let mut index = MockSimilarityIndex::new();
        index.expect_query().times(0);

        let retriever = CandidateRetriever::new(Arc::new(index), 10);
        let candidates = retriever.retrieve(&[], &HashSet::new()).await.unwrap();
        assert!(candidates.is_empty());
    }
}
