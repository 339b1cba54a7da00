//! A submitted job.

use chrono::{DateTime, Utc};
use fresco_core::{JobId, JobRequest, output_filename};

/// One generation run, fixed at submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Unique id
    pub id: JobId,
    /// What to generate
    pub request: JobRequest,
    /// Name the video is published under
    pub filename: String,
    /// When the job was accepted
    pub submitted_at: DateTime<Utc>,
}

impl Job {
    /// Job for `request`, submitted now.
    pub fn new(request: JobRequest) -> Self {
        Self::submitted_at(request, Utc::now())
    }

    /// Job for `request` with an explicit submission time.
    pub fn submitted_at(request: JobRequest, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: JobId::new(),
            filename: output_filename(&request.topic, submitted_at),
            request,
            submitted_at,
        }
    }
}
