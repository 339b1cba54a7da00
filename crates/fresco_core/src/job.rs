//! Job requests, identifiers, and status.

use crate::Stage;
use chrono::{DateTime, Utc};
use fresco_error::{FrescoResult, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Longest topic accepted, in characters.
const MAX_TOPIC_CHARS: usize = 200;
/// Allowed requested duration in seconds.
const DURATION_RANGE: std::ops::RangeInclusive<u32> = 10..=300;
/// Topic prefix length kept in output filenames.
const FILENAME_TOPIC_CHARS: usize = 30;

/// Unique identifier for one job.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display, derive_more::From,
)]
#[serde(transparent)]
pub struct JobId(uuid::Uuid);

impl JobId {
    /// A fresh random id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Parse the hyphenated form.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if `s` is not a UUID.
    pub fn parse(s: &str) -> FrescoResult<Self> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| ValidationError::new(format!("invalid job id '{}': {}", s, e)).into())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

/// A request to generate one video.
///
/// # Examples
///
/// ```
/// use fresco_core::JobRequest;
///
/// let request = JobRequest::new("Introduction to Machine Learning")
///     .with_duration(90)
///     .with_key_points(vec!["What is ML".to_string()]);
/// assert!(request.validate().is_ok());
/// assert_eq!(request.style, "educational");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    /// Video topic
    pub topic: String,
    /// Requested duration in seconds
    #[serde(default = "default_duration")]
    pub duration: u32,
    /// Key points the script should cover
    #[serde(default)]
    pub key_points: Vec<String>,
    /// Presentation style
    #[serde(default = "default_style")]
    pub style: String,
}

fn default_duration() -> u32 {
    60
}

fn default_style() -> String {
    "educational".to_string()
}

impl JobRequest {
    /// Request with default duration and style and no key points.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            duration: default_duration(),
            key_points: Vec::new(),
            style: default_style(),
        }
    }

    /// Set the requested duration.
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    /// Set the key points.
    pub fn with_key_points(mut self, key_points: Vec<String>) -> Self {
        self.key_points = key_points;
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Reject malformed requests before a job is created.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for an empty or overlong topic or a
    /// duration outside 10–300 seconds.
    pub fn validate(&self) -> FrescoResult<()> {
        let chars = self.topic.trim().chars().count();
        if chars == 0 {
            return Err(ValidationError::new("topic must not be empty").into());
        }
        if chars > MAX_TOPIC_CHARS {
            return Err(ValidationError::new(format!(
                "topic is {} characters, maximum is {}",
                chars, MAX_TOPIC_CHARS
            ))
            .into());
        }
        if !DURATION_RANGE.contains(&self.duration) {
            return Err(ValidationError::new(format!(
                "duration {}s outside {}..={}s",
                self.duration,
                DURATION_RANGE.start(),
                DURATION_RANGE.end()
            ))
            .into());
        }
        Ok(())
    }
}

/// Derive the published filename from a topic and submission time.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`, the result is cut to
/// 30 characters, and the Unix timestamp is appended.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use fresco_core::output_filename;
///
/// let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
/// assert_eq!(output_filename("Intro to ML!", at), "Intro_to_ML__1700000000.mp4");
/// ```
pub fn output_filename(topic: &str, submitted_at: DateTime<Utc>) -> String {
    let clean: String = topic
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(FILENAME_TOPIC_CHARS)
        .collect();
    format!("{}_{}.mp4", clean, submitted_at.timestamp())
}

/// Acknowledgement returned immediately on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAck {
    /// Id to poll status with
    pub job_id: JobId,
    /// Filename the video will be published under
    pub video_filename: String,
    /// Where the video will appear once published
    pub video_path: PathBuf,
    /// Always "started"
    pub status: String,
}

/// Observable state of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobStatus {
    /// Queued, waiting for a worker
    Pending,
    /// A worker is executing `stage`
    Running {
        /// Current stage
        stage: Stage,
    },
    /// Published successfully
    Succeeded {
        /// Path of the published video
        published: PathBuf,
    },
    /// Halted at `stage`
    Failed {
        /// Stage that failed
        stage: Stage,
        /// Human-readable cause
        cause: String,
    },
}

impl JobStatus {
    /// Whether the job will not change state again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded { .. } | JobStatus::Failed { .. })
    }
}
