//! gRPC server initialization and lifecycle management
//!
//! This module handles all server setup:
//! - Tracing initialization
//! - Warehouse and Qdrant connections
//! - Authentication interceptor
//! - Health check service (grpc.health.v1.Health)
//! - Reflection service (grpc.reflection.v1.ServerReflection)
//! - Graceful shutdown with a bounded drain deadline

use core_config::server::ServerConfig;
use core_config::{Environment, FromEnv};
use domain_recommendation::{
    EngineParams, QdrantIndex, QdrantIndexConfig, RecommendationEngine, WarehouseClient,
    WarehouseConfig,
};
use eyre::{Result, WrapErr};
use rpc::recommendation::video_recommendation_server::{VideoRecommendationServer, SERVICE_NAME};
use tokio::sync::watch;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic_health::server::health_reporter;
use tower::limit::GlobalConcurrencyLimitLayer;
use tracing::{info, warn};

use crate::auth::{AuthConfig, AuthGate};
use crate::pool::bind_reuseport;
use crate::service::VideoRecommendationImpl;

/// Run the gRPC server
///
/// This is the main entry point for server initialization. It:
/// 1. Sets up structured logging (env-aware: JSON for prod, pretty for dev)
/// 2. Loads the auth interceptor key and expected claims
/// 3. Connects to the embedding warehouse and Qdrant
/// 4. Binds the listener with `SO_REUSEPORT` for optional replication
/// 5. Starts the gRPC server with compression, health and reflection
/// 6. On SIGTERM/Ctrl-C, drains in-flight calls up to a deadline
///
/// # Errors
///
/// Returns an error if any configuration is invalid, an upstream
/// connection cannot be established, the listener fails to bind, or the
/// server runtime encounters an error.
pub async fn run() -> Result<()> {
    // Initialize error reports and tracing (env-aware: JSON for prod, pretty for dev)
    core_config::tracing::install_color_eyre();
    let environment = Environment::from_env();
    core_config::tracing::init_tracing(&environment);

    let server_config = ServerConfig::from_env().wrap_err("Failed to load server configuration")?;
    let auth_config = AuthConfig::from_env().wrap_err("Failed to load auth configuration")?;
    let auth_gate = AuthGate::new(&auth_config)?;

    let warehouse_config =
        WarehouseConfig::from_env().wrap_err("Failed to load warehouse configuration")?;
    let store =
        WarehouseClient::new(warehouse_config).wrap_err("Failed to build warehouse client")?;

    let qdrant_config =
        QdrantIndexConfig::from_env().wrap_err("Failed to load Qdrant configuration")?;
    info!("Connecting to Qdrant at {}...", qdrant_config.url);
    let index = QdrantIndex::new(qdrant_config)
        .await
        .wrap_err("Failed to connect to Qdrant")?;
    info!("Connected to Qdrant successfully");

    let params = EngineParams::from_env().wrap_err("Failed to load engine parameters")?;
    let engine = RecommendationEngine::new(store, index, params);
    let service = VideoRecommendationImpl::new(engine);

    let addr = server_config.socket_addr()?;
    let listener = bind_reuseport(addr)
        .wrap_err_with(|| format!("Failed to bind {}", server_config.addr_string()))?;
    info!(
        "VideoRecommendation listening on {} (SO_REUSEPORT)",
        server_config.addr_string()
    );
    info!("Using Zstd compression for optimal performance");

    // Create a health reporter for Kubernetes probes
    let (health_reporter, health_service) = health_reporter();
    health_reporter
        .set_service_status(SERVICE_NAME, tonic_health::ServingStatus::Serving)
        .await;
    // Also set an empty service name for generic health checks (what k8s uses by default)
    health_reporter
        .set_service_status("", tonic_health::ServingStatus::Serving)
        .await;
    info!("Health check service enabled (grpc.health.v1.Health)");

    let reflection_service = tonic_reflection::server::Builder::configure()
        .register_file_descriptor_set(rpc::descriptor::file_descriptor_set())
        .build_v1()
        .wrap_err("Failed to build reflection service")?;
    info!("Reflection service enabled (grpc.reflection.v1.ServerReflection)");

    // Shutdown signal shared between the server and the drain watchdog.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let mut server_rx = shutdown_rx.clone();
    let router = Server::builder()
        // Admission control: excess RPCs queue instead of dispatching.
        .layer(GlobalConcurrencyLimitLayer::new(
            server_config.max_concurrent_rpcs,
        ))
        .add_service(health_service)
        .add_service(reflection_service)
        .add_service(
            tonic::service::interceptor::InterceptedService::new(
                VideoRecommendationServer::new(service)
                    .accept_compressed(tonic::codec::CompressionEncoding::Zstd)
                    .send_compressed(tonic::codec::CompressionEncoding::Zstd),
                auth_gate,
            ),
        );

    let mut server_handle = tokio::spawn(router.serve_with_incoming_shutdown(
        TcpListenerStream::new(listener),
        async move {
            let _ = server_rx.changed().await;
        },
    ));

    let mut drain_rx = shutdown_rx;
    tokio::select! {
        result = &mut server_handle => {
            result
                .wrap_err("gRPC server task panicked")?
                .wrap_err("gRPC server failed")?;
            return Ok(());
        }
        _ = drain_rx.changed() => {}
    }

    info!(
        "Shutdown signal received, draining in-flight calls for up to {:?}",
        server_config.drain_deadline
    );
    match tokio::time::timeout(server_config.drain_deadline, &mut server_handle).await {
        Ok(result) => {
            result
                .wrap_err("gRPC server task panicked")?
                .wrap_err("gRPC server failed")?;
            info!("Drained cleanly");
        }
        Err(_) => {
            warn!("Drain deadline exceeded, aborting remaining calls");
            server_handle.abort();
        }
    }

    Ok(())
}

/// Resolves when the process is asked to stop.
///
/// SIGTERM covers orchestrators; Ctrl-C covers local runs.
async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
