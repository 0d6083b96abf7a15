//! Recommendation Domain Library
//!
//! This module implements the video recommendation pipeline: look up
//! embeddings for a viewer's recent successful plays, sample a few of them
//! as retrieval seeds, and fan out similarity queries against the vector
//! index, excluding everything the viewer has already watched.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │        RecommendationEngine        │  ← fetch → filter → sample → retrieve
//! └──────┬───────────┬────────────┬────┘
//!        │           │            │
//! ┌──────▼───────┐ ┌─▼───────┐ ┌──▼─────────────────┐
//! │EmbeddingStore│ │ Sampler │ │ CandidateRetriever │
//! │   (trait)    │ └─────────┘ └──┬─────────────────┘
//! └──────┬───────┘                │
//!        │               ┌────────▼────────┐
//! ┌──────▼────────┐      │ SimilarityIndex │
//! │WarehouseClient│      │     (trait)     │
//! └───────────────┘      └────────┬────────┘
//!                        ┌────────▼────────┐
//!                        │   QdrantIndex   │
//!                        └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::collections::HashSet;
//! use domain_recommendation::{
//!     EngineParams, QdrantIndex, QdrantIndexConfig, RecommendationEngine,
//!     WarehouseClient, WarehouseConfig,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = WarehouseClient::new(WarehouseConfig::from_env()?)?;
//! let index = QdrantIndex::new(QdrantIndexConfig::from_env()?).await?;
//! let engine = RecommendationEngine::new(store, index, EngineParams::default());
//!
//! let watch_history: HashSet<String> = HashSet::new();
//! let successful_plays = vec!["gs://videos/a.mp4".to_string()];
//! let video_ids = engine.recommend(&successful_plays, &watch_history).await?;
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod index;
pub mod models;
pub mod qdrant;
pub mod retriever;
pub mod sampler;
pub mod store;
pub mod warehouse;

// Re-export commonly used types
pub use engine::RecommendationEngine;
pub use error::{RecommendationError, RecommendationResult};
pub use index::SimilarityIndex;
pub use models::{EmbeddingRecord, EngineParams};
pub use qdrant::{QdrantIndex, QdrantIndexConfig};
pub use retriever::CandidateRetriever;
pub use sampler::Sampler;
pub use store::EmbeddingStore;
pub use warehouse::{WarehouseClient, WarehouseConfig};
