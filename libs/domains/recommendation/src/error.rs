use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("Embedding warehouse error: {0}")]
    Warehouse(String),

    #[error("Similarity index error: {0}")]
    Index(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type RecommendationResult<T> = Result<T, RecommendationError>;

impl From<qdrant_client::QdrantError> for RecommendationError {
    fn from(err: qdrant_client::QdrantError) -> Self {
        RecommendationError::Index(err.to_string())
    }
}

impl From<reqwest::Error> for RecommendationError {
    fn from(err: reqwest::Error) -> Self {
        RecommendationError::Warehouse(err.to_string())
    }
}

impl From<serde_json::Error> for RecommendationError {
    fn from(err: serde_json::Error) -> Self {
        RecommendationError::Internal(format!("Serialization error: {err}"))
    }
}

impl From<RecommendationError> for tonic::Status {
    fn from(err: RecommendationError) -> Self {
        match err {
            // Upstream details stay server-side; callers only learn that
            // retrieval failed.
            RecommendationError::Warehouse(_) | RecommendationError::Index(_) => {
                tonic::Status::internal("recommendation retrieval failed")
            }
            RecommendationError::Config(msg) => tonic::Status::failed_precondition(msg),
            RecommendationError::Internal(_) => {
                tonic::Status::internal("recommendation retrieval failed")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_errors_are_opaque_to_callers() {
        let err = RecommendationError::Warehouse("credentials expired for table x".to_string());
        let status = tonic::Status::from(err);
        assert_eq!(status.code(), tonic::Code::Internal);
        assert!(!status.message().contains("credentials"));

        let err = RecommendationError::Index("connection refused to 10.0.0.7".to_string());
        let status = tonic::Status::from(err);
        assert_eq!(status.code(), tonic::Code::Internal);
        assert!(!status.message().contains("10.0.0.7"));
    }

    #[test]
    fn test_config_error_maps_to_failed_precondition() {
        let err = RecommendationError::Config("missing collection name".to_string());
        let status = tonic::Status::from(err);
        assert_eq!(status.code(), tonic::Code::FailedPrecondition);
    }
}
