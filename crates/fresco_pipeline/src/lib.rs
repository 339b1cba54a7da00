//! Job orchestration for Fresco.
//!
//! The [`Orchestrator`] drives one job through
//! `Cleaning → Scripting → Imaging → Narrating → Timing → Assembling →
//! Publishing → Done`, halting at the first stage that fails. The
//! [`JobQueue`] feeds a pool of workers that each run one job at a time
//! and exposes every job's status while it runs.
//!
//! # Example
//!
//! ```rust,no_run
//! use fresco_core::{FrescoConfig, JobRequest};
//! use fresco_pipeline::{Collaborators, JobQueue, Orchestrator};
//! use fresco_media::FfmpegEncoder;
//! use std::sync::Arc;
//!
//! # async fn example(collaborators: Collaborators) -> fresco_error::FrescoResult<()> {
//! let config = FrescoConfig::load()?;
//! let encoder = Arc::new(FfmpegEncoder::new(config.video.clone(), config.paths.font.clone()));
//! let workers = config.workers;
//! let orchestrator = Orchestrator::new(config, collaborators, encoder)?;
//! let queue = JobQueue::start(Arc::new(orchestrator), workers);
//!
//! let handle = queue.submit(JobRequest::new("How tides work"))?;
//! println!("queued {} as {}", handle.id(), handle.ack().video_filename);
//! let status = handle.wait().await;
//! println!("finished: {:?}", status);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod collaborators;
mod job;
mod media_bytes;
mod orchestrator;
mod pacing;
mod queue;
mod subtitles;

pub use collaborators::Collaborators;
pub use job::Job;
pub use media_bytes::{resolve_media, sniff_image_extension};
pub use orchestrator::Orchestrator;
pub use pacing::CallPacer;
pub use queue::{JobHandle, JobQueue};
pub use subtitles::{AlignedNarration, align_narration, narration_cues, timed_cues};
