//! Video Recommendation gRPC Service
//!
//! Library interface exposing the server entry point and its building
//! blocks for integration testing.

pub mod auth;
pub mod pool;
pub mod server;
pub mod service;

pub use server::run;
