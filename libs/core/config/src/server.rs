use crate::{env_or_default, env_parsed_or, ConfigError, FromEnv};
use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the gRPC server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Interface to bind (default: `[::]`, all interfaces)
    pub host: String,
    /// Port to listen on (default: 50051)
    pub port: u16,
    /// Upper bound on concurrently-dispatched RPCs (default: 10)
    pub max_concurrent_rpcs: usize,
    /// How long in-flight calls may drain after a shutdown signal
    pub drain_deadline: Duration,
}

impl ServerConfig {
    /// Get the socket address to bind to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "GRPC_HOST/GRPC_PORT".to_string(),
                details: format!("{}", e),
            })
    }

    /// Get the address string (for logging).
    pub fn addr_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// Reads:
    /// - `GRPC_HOST` (default: `[::]`)
    /// - `GRPC_PORT` (default: 50051)
    /// - `RECSYS_MAX_CONCURRENT_RPCS` (default: 10)
    /// - `RECSYS_DRAIN_DEADLINE_SECS` (default: 10)
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("GRPC_HOST", "[::]");
        let port = env_parsed_or("GRPC_PORT", 50051)?;
        let max_concurrent_rpcs = env_parsed_or("RECSYS_MAX_CONCURRENT_RPCS", 10)?;
        let drain_deadline_secs: u64 = env_parsed_or("RECSYS_DRAIN_DEADLINE_SECS", 10)?;

        Ok(Self {
            host,
            port,
            max_concurrent_rpcs,
            drain_deadline: Duration::from_secs(drain_deadline_secs),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "[::]".to_string(),
            port: 50051,
            max_concurrent_rpcs: 10,
            drain_deadline: Duration::from_secs(10),
        }
    }
}
