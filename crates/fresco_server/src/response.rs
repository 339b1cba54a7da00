//! Response bodies.

use fresco_core::{JobAck, JobId, JobStatus};
use serde::{Deserialize, Serialize};

/// Answer to a generate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Always true; rejected requests answer with an error body
    pub success: bool,
    /// Human-readable summary
    pub message: String,
    /// The queued job
    #[serde(flatten)]
    pub ack: JobAck,
    /// Where the video can be downloaded once published
    pub download_url: String,
}

/// Answer to a status request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Job queried
    pub job_id: JobId,
    /// Its current state
    pub status: JobStatus,
}

/// One published video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEntry {
    /// File name
    pub name: String,
    /// Download route for the file
    pub path: String,
}

/// Download route for a published file name.
pub(crate) fn download_url(name: &str) -> String {
    format!("/api/v1/videos/download/{}", name)
}
