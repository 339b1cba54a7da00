//! Single-job command handler.

use fresco::{FrescoConfig, FrescoResult, JobQueue, JobRequest, JobStatus, build_orchestrator};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Handle the `run` command: submit one job, follow its stages, and print
/// the published path.
pub async fn run_job(
    config: FrescoConfig,
    topic: String,
    duration: u32,
    key_points: Vec<String>,
    style: String,
    timeout: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = JobRequest::new(topic)
        .with_duration(duration)
        .with_key_points(key_points)
        .with_style(style);

    let queue = JobQueue::start(Arc::new(build_orchestrator(config)?), 1);
    let handle = queue.submit(request)?;
    info!(job_id = %handle.id(), filename = %handle.ack().video_filename, "Job submitted");

    let status = match timeout {
        Some(secs) => match tokio::time::timeout(Duration::from_secs(secs), handle.wait()).await {
            Ok(status) => status,
            Err(_) => {
                warn!(secs, "Gave up waiting for the job");
                return Err(format!("job did not finish within {}s", secs).into());
            }
        },
        None => handle.wait().await,
    };

    report(status)?;
    queue.shutdown().await;
    Ok(())
}

fn report(status: JobStatus) -> FrescoResult<()> {
    match status {
        JobStatus::Succeeded { published } => {
            println!("{}", published.display());
            Ok(())
        }
        JobStatus::Failed { stage, cause } => {
            Err(fresco::PipelineError::new(stage.to_string(), cause).into())
        }
        other => Err(fresco::PipelineError::new("queue", format!("job ended as {:?}", other)).into()),
    }
}
