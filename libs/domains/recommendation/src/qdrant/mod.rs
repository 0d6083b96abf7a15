pub mod client;
pub mod config;

pub use client::QdrantIndex;
pub use config::QdrantIndexConfig;
