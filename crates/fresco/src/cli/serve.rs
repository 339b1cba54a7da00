//! API server command handler.

use fresco::{FrescoConfig, FrescoResult, JobQueue, build_orchestrator, serve};
use std::sync::Arc;
use tracing::info;

/// Handle the `serve` command.
pub async fn serve_api(
    config: FrescoConfig,
    host: Option<String>,
    port: Option<u16>,
) -> FrescoResult<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let workers = config.workers;

    let queue = Arc::new(JobQueue::start(Arc::new(build_orchestrator(config)?), workers));
    info!(workers, "Starting API server. Press Ctrl+C to stop.");
    serve(&host, port, queue).await
}
