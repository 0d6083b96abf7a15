//! Recommendation gRPC service implementation
//!
//! Thin handler over the domain engine: collect the watch history into a
//! set, run the pipeline, and map domain errors onto gRPC statuses.

use std::collections::HashSet;
use std::sync::Arc;

use domain_recommendation::{EmbeddingStore, RecommendationEngine, SimilarityIndex};
use rpc::recommendation::video_recommendation_server::VideoRecommendation;
use rpc::recommendation::{RecommendationRequest, RecommendationResponse};
use tonic::{Request, Response, Status};
use tracing::{error, info};

/// gRPC service implementation for video recommendations.
///
/// Generic over the store and index types for testability.
pub struct VideoRecommendationImpl<S, I>
where
    S: EmbeddingStore + 'static,
    I: SimilarityIndex + 'static,
{
    engine: Arc<RecommendationEngine<S, I>>,
}

impl<S, I> VideoRecommendationImpl<S, I>
where
    S: EmbeddingStore + 'static,
    I: SimilarityIndex + 'static,
{
    pub fn new(engine: RecommendationEngine<S, I>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

#[tonic::async_trait]
impl<S, I> VideoRecommendation for VideoRecommendationImpl<S, I>
where
    S: EmbeddingStore + 'static,
    I: SimilarityIndex + 'static,
{
    async fn get_recommendations(
        &self,
        request: Request<RecommendationRequest>,
    ) -> Result<Response<RecommendationResponse>, Status> {
        let req = request.into_inner();
        let watch_history: HashSet<String> = req.watch_history.into_iter().collect();

        let video_ids = self
            .engine
            .recommend(&req.successful_plays, &watch_history)
            .await
            .map_err(|e| {
                error!(viewer_id = %req.viewer_id, error = %e, "Recommendation pipeline failed");
                Status::from(e)
            })?;

        info!(
            viewer_id = %req.viewer_id,
            candidates = video_ids.len(),
            "Served recommendations"
        );

        Ok(Response::new(RecommendationResponse { video_ids }))
    }
}
