//! Fresco: turn a topic into a narrated, illustrated, subtitled video.
//!
//! Fresco asks a script generator for narration and visual cues, generates
//! one image per cue and one audio clip per narration line, times subtitle
//! cues against the measured audio, and assembles everything into a single
//! video with intro and outro cards.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fresco::{FrescoConfig, JobQueue, JobRequest, build_orchestrator};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FrescoConfig::load()?;
//!     let workers = config.workers;
//!     let queue = JobQueue::start(Arc::new(build_orchestrator(config)?), workers);
//!
//!     let handle = queue.submit(JobRequest::new("How tides work"))?;
//!     println!("{:?}", handle.wait().await);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Fresco is organized as a workspace with focused crates:
//!
//! - `fresco_error` - Error types
//! - `fresco_core` - Data model and configuration
//! - `fresco_interface` - Script, image, and speech generator traits
//! - `fresco_storage` - Segment store, job workspace, publisher
//! - `fresco_media` - Duration probing, subtitle timing, timeline assembly
//! - `fresco_pipeline` - Orchestrator and job queue
//! - `fresco_models` - HTTP generator backends
//! - `fresco_server` - HTTP submission surface
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod observability;

pub use app::{build_orchestrator, http_collaborators, render_subtitles};
pub use observability::{ObservabilityConfig, init_observability};

pub use fresco_error::{
    AlignmentError, AssemblyError, AssemblyErrorKind, ConfigError, FrescoError, FrescoErrorKind,
    FrescoResult, GenerationError, GenerationErrorKind, HttpError, JsonError, MediaError,
    MediaErrorKind, PipelineError, StorageError, StorageErrorKind, ValidationError,
};

pub use fresco_core::{
    FrescoConfig, ImagingConfig, JobAck, JobId, JobRequest, JobStatus, MediaSource,
    NarrationSegment, PathsConfig, ProvidersConfig, Script, ServerConfig, Stage, SubtitleCue,
    TimingConfig, VideoConfig, VisualCue, VoicesConfig, output_filename,
};

pub use fresco_interface::{ImageGenerator, ScriptGenerator, SpeechGenerator};

pub use fresco_storage::{
    JobWorkspace, Publisher, Segment, SegmentIndex, SegmentKind, VIDEO_EXTENSIONS, list,
    list_segments, segment_index, validate_filename,
};

pub use fresco_media::{
    Assembler, AssemblyInputs, CachingProber, Clip, DefaultProber, DurationProber, Encoder,
    FfmpegEncoder, FfprobeProber, SegmentInput, Timeline, TitleCard, WavProber, clip_fades,
    compute_cues, format_timestamp, paired_count, render_srt,
};

pub use fresco_pipeline::{
    AlignedNarration, CallPacer, Collaborators, Job, JobHandle, JobQueue, Orchestrator,
    align_narration, narration_cues, resolve_media, sniff_image_extension, timed_cues,
};

pub use fresco_models::{HttpImageGenerator, HttpScriptGenerator, HttpSpeechGenerator, ProviderClient};

pub use fresco_server::{ApiError, ApiState, create_router, serve};
