//! Video Recommendation gRPC Service - Entry Point
//!
//! Builds the runtime by hand so the worker pool can be sized to the
//! machine, then delegates to the server module.

use std::num::NonZeroUsize;

fn main() -> eyre::Result<()> {
    let default_workers = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(4);
    let workers = core_config::env_parsed_or("RECSYS_WORKER_THREADS", default_workers)?;

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()?
        .block_on(recsys::run())
}
