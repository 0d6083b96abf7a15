use std::collections::HashSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, instrument};

use crate::error::RecommendationResult;
use crate::index::SimilarityIndex;
use crate::models::EngineParams;
use crate::retriever::CandidateRetriever;
use crate::sampler::Sampler;
use crate::store::EmbeddingStore;

/// Stateless recommendation pipeline: fetch seed embeddings, drop records
/// of the wrong dimension, sample a handful of seeds, fan out similarity
/// queries, and return the concatenated candidates.
pub struct RecommendationEngine<S: EmbeddingStore, I: SimilarityIndex> {
    store: S,
    sampler: Sampler,
    retriever: CandidateRetriever<I>,
    params: EngineParams,
    rng_seed: Option<u64>,
}

impl<S: EmbeddingStore, I: SimilarityIndex> RecommendationEngine<S, I> {
    pub fn new(store: S, index: I, params: EngineParams) -> Self {
        Self {
            store,
            sampler: Sampler::new(params.sample_size),
            retriever: CandidateRetriever::new(Arc::new(index), params.top_k),
            params,
            rng_seed: None,
        }
    }

    /// Pins the sampling RNG, making recommendations reproducible.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    #[instrument(skip_all, fields(plays = successful_plays.len(), history = watch_history.len()))]
    pub async fn recommend(
        &self,
        successful_plays: &[String],
        watch_history: &HashSet<String>,
    ) -> RecommendationResult<Vec<String>> {
        let records = self.store.fetch_embeddings(successful_plays).await?;
        let fetched = records.len();

        let eligible: Vec<_> = records
            .into_iter()
            .filter(|r| r.has_dimension(self.params.embedding_dimension))
            .collect();
        if eligible.len() < fetched {
            debug!(
                dropped = fetched - eligible.len(),
                dimension = self.params.embedding_dimension,
                "Dropped embeddings with the wrong dimension"
            );
        }

        let mut rng = self.rng();
        let seeds = self.sampler.sample(eligible, &mut rng);

        self.retriever.retrieve(&seeds, watch_history).await
    }

    fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecommendationError;
    use crate::index::MockSimilarityIndex;
    use crate::models::EmbeddingRecord;
    use crate::store::MockEmbeddingStore;

    const DIM: usize = 1408;

    fn record(id: &str, dim: usize) -> EmbeddingRecord {
        EmbeddingRecord::new(id, vec![0.1; dim])
    }

    fn history(n: usize) -> HashSet<String> {
        (0..n).map(|i| format!("watched-{i}")).collect()
    }

    fn plays(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("played-{i}")).collect()
    }

    #[tokio::test]
    async fn test_full_pipeline_respects_sample_size_and_history() {
        let watch_history = history(10);
        let successful_plays = plays(6);

        let mut store = MockEmbeddingStore::new();
        store
            .expect_fetch_embeddings()
            .withf(|ids| ids.len() == 6)
            .returning(|ids| Ok(ids.iter().map(|id| record(id, DIM)).collect()));

        let mut index = MockSimilarityIndex::new();
        // 6 eligible seeds, sample size 5: exactly 5 queries.
        index
            .expect_query()
            .times(5)
            .returning(|_, top_k, exclude| {
                assert_eq!(top_k, 10);
                assert_eq!(exclude.len(), 10);
                Ok((0..top_k).map(|i| format!("candidate-{i}")).collect())
            });

        let engine =
            RecommendationEngine::new(store, index, EngineParams::default()).with_rng_seed(42);
        let result = engine
            .recommend(&successful_plays, &watch_history)
            .await
            .unwrap();

        assert_eq!(result.len(), 50);
        assert!(result.iter().all(|id| !watch_history.contains(id)));
    }

    #[tokio::test]
    async fn test_wrong_dimension_records_are_dropped_silently() {
        let mut store = MockEmbeddingStore::new();
        store
            .expect_fetch_embeddings()
            .returning(|_| Ok(vec![record("a", 768), record("b", 512), record("c", 64)]));

        let mut index = MockSimilarityIndex::new();
        index.expect_query().times(0);

        let engine = RecommendationEngine::new(store, index, EngineParams::default());
        let result = engine.recommend(&plays(3), &HashSet::new()).await.unwrap();

        // Everything filtered out is a valid empty response, not an error.
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_fewer_eligible_records_than_sample_size() {
        let mut store = MockEmbeddingStore::new();
        store
            .expect_fetch_embeddings()
            .returning(|_| Ok(vec![record("a", DIM), record("b", DIM)]));

        let mut index = MockSimilarityIndex::new();
        index
            .expect_query()
            .times(2)
            .returning(|_, _, _| Ok(vec!["x".to_string()]));

        let engine = RecommendationEngine::new(store, index, EngineParams::default());
        let result = engine.recommend(&plays(2), &HashSet::new()).await.unwrap();
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockEmbeddingStore::new();
        store
            .expect_fetch_embeddings()
            .returning(|_| Err(RecommendationError::Warehouse("query timed out".to_string())));

        let mut index = MockSimilarityIndex::new();
        index.expect_query().times(0);

        let engine = RecommendationEngine::new(store, index, EngineParams::default());
        let result = engine.recommend(&plays(3), &HashSet::new()).await;
        assert!(matches!(result, Err(RecommendationError::Warehouse(_))));
    }

    #[tokio::test]
    async fn test_no_successful_plays_yields_empty_result() {
        let mut store = MockEmbeddingStore::new();
        store.expect_fetch_embeddings().returning(|_| Ok(Vec::new()));

        let mut index = MockSimilarityIndex::new();
        index.expect_query().times(0);

        let engine = RecommendationEngine::new(store, index, EngineParams::default());
        let result = engine.recommend(&[], &history(10)).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_pinned_seed_gives_stable_results() {
        let make_engine = || {
            let mut store = MockEmbeddingStore::new();
            store.expect_fetch_embeddings().returning(|ids| {
                Ok(ids.iter().map(|id| record(id, DIM)).collect())
            });
            let mut index = MockSimilarityIndex::new();
            index.expect_query().returning(|vector, _, _| {
                Ok(vec![format!("near-{}", vector.len())])
            });
            RecommendationEngine::new(store, index, EngineParams::default()).with_rng_seed(7)
        };

        let a = make_engine()
            .recommend(&plays(20), &HashSet::new())
            .await
            .unwrap();
        let b = make_engine()
            .recommend(&plays(20), &HashSet::new())
            .await
            .unwrap();
        assert_eq!(a, b);
    }
}
