//! Job queue and worker pool.

use crate::{Job, Orchestrator};
use fresco_core::{JobAck, JobId, JobRequest, JobStatus, Stage};
use fresco_error::{FrescoErrorKind, FrescoResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

type Registry = Arc<RwLock<HashMap<JobId, watch::Receiver<JobStatus>>>>;

struct QueuedJob {
    job: Job,
    status: watch::Sender<JobStatus>,
}

/// Caller's view of one submitted job.
///
/// Dropping the handle does not cancel the job.
#[derive(Debug, Clone)]
pub struct JobHandle {
    ack: JobAck,
    status: watch::Receiver<JobStatus>,
}

impl JobHandle {
    /// The job's id.
    pub fn id(&self) -> JobId {
        self.ack.job_id
    }

    /// Acknowledgement returned at submission.
    pub fn ack(&self) -> &JobAck {
        &self.ack
    }

    /// Current status.
    pub fn status(&self) -> JobStatus {
        self.status.borrow().clone()
    }

    /// Wait until the job succeeds or fails.
    ///
    /// Wrap in `tokio::time::timeout` to bound the wait.
    pub async fn wait(mut self) -> JobStatus {
        loop {
            let current = self.status.borrow_and_update().clone();
            if current.is_terminal() {
                return current;
            }
            if self.status.changed().await.is_err() {
                // Worker gone; report the last state it published
                return self.status.borrow().clone();
            }
        }
    }
}

/// Accepts jobs and runs them on a fixed pool of workers.
///
/// Jobs share no mutable state: each gets its own scratch workspace and
/// status channel. The registry only maps ids to status receivers.
pub struct JobQueue {
    orchestrator: Arc<Orchestrator>,
    sender: mpsc::UnboundedSender<QueuedJob>,
    registry: Registry,
    workers: Vec<JoinHandle<()>>,
}

impl JobQueue {
    /// Spawn `workers` workers (at least one) on the current Tokio runtime.
    pub fn start(orchestrator: Arc<Orchestrator>, workers: usize) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let receiver = Arc::new(Mutex::new(receiver));
        let count = workers.max(1);

        let workers = (0..count)
            .map(|worker| {
                let receiver = Arc::clone(&receiver);
                let orchestrator = Arc::clone(&orchestrator);
                tokio::spawn(work(worker, receiver, orchestrator))
            })
            .collect();
        info!(workers = count, "Job queue started");

        Self {
            orchestrator,
            sender,
            registry: Arc::new(RwLock::new(HashMap::new())),
            workers,
        }
    }

    /// Validate and enqueue `request`, returning immediately.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for a malformed request, or a
    /// `PipelineError` if the workers have shut down.
    #[instrument(skip(self, request), fields(topic = %request.topic))]
    pub fn submit(&self, request: JobRequest) -> FrescoResult<JobHandle> {
        request.validate()?;
        let job = Job::new(request);
        let ack = JobAck {
            job_id: job.id,
            video_filename: job.filename.clone(),
            video_path: self.orchestrator.publisher().path_for(&job.filename),
            status: "started".to_string(),
        };

        let (status, receiver) = watch::channel(JobStatus::Pending);
        self.registry.write().insert(job.id, receiver.clone());
        let id = job.id;
        if self.sender.send(QueuedJob { job, status }).is_err() {
            self.registry.write().remove(&id);
            return Err(fresco_error::PipelineError::new("queue", "workers have shut down").into());
        }

        info!(job_id = %id, filename = %ack.video_filename, "Job queued");
        Ok(JobHandle {
            ack,
            status: receiver,
        })
    }

    /// Status of a known job.
    pub fn status(&self, id: &JobId) -> Option<JobStatus> {
        self.registry.read().get(id).map(|rx| rx.borrow().clone())
    }

    /// Ids of every job submitted to this queue.
    pub fn job_ids(&self) -> Vec<JobId> {
        self.registry.read().keys().copied().collect()
    }

    /// Published video names, sorted.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the publish directory cannot be read.
    pub async fn list_published(&self) -> FrescoResult<Vec<String>> {
        self.orchestrator.publisher().list_published().await
    }

    /// Path of a published video.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for unsafe names and
    /// `StorageError::NotFound` for unknown ones.
    pub async fn retrieve(&self, file_name: &str) -> FrescoResult<PathBuf> {
        self.orchestrator.publisher().retrieve(file_name).await
    }

    /// Stop accepting jobs and wait for queued ones to finish.
    pub async fn shutdown(self) {
        drop(self.sender);
        for worker in self.workers {
            if let Err(e) = worker.await {
                error!(error = %e, "Worker task ended abnormally");
            }
        }
    }
}

async fn work(
    worker: usize,
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<QueuedJob>>>,
    orchestrator: Arc<Orchestrator>,
) {
    loop {
        let next = receiver.lock().await.recv().await;
        let Some(QueuedJob { job, status }) = next else {
            break;
        };
        info!(worker, job_id = %job.id, "Worker picked up job");
        let status = Arc::new(status);

        let task = {
            let orchestrator = Arc::clone(&orchestrator);
            let status = Arc::clone(&status);
            tokio::spawn(async move {
                let report = |stage: Stage| {
                    status.send_replace(JobStatus::Running { stage });
                };
                orchestrator.run(&job, &report).await
            })
        };

        let stage = || match &*status.borrow() {
            JobStatus::Running { stage } => *stage,
            _ => Stage::Cleaning,
        };
        let outcome = match task.await {
            Ok(Ok(published)) => JobStatus::Succeeded { published },
            Ok(Err(e)) => {
                let cause = match e.kind() {
                    FrescoErrorKind::Pipeline(p) => p.cause.clone(),
                    _ => e.to_string(),
                };
                JobStatus::Failed {
                    stage: stage(),
                    cause,
                }
            }
            Err(e) => JobStatus::Failed {
                stage: stage(),
                cause: format!("job task aborted: {}", e),
            },
        };
        status.send_replace(outcome);
    }
    info!(worker, "Worker stopped");
}
