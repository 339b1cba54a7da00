//! Core data types for the Fresco video pipeline.
//!
//! This crate provides the types shared across all Fresco crates: job
//! requests and status, the structured script, subtitle cues, pipeline
//! stages, media sources, and the layered configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod cue;
mod job;
mod media;
mod script;
mod stage;

pub use config::{
    FrescoConfig, ImagingConfig, PathsConfig, ProvidersConfig, ServerConfig, TimingConfig,
    VideoConfig, VoicesConfig,
};
pub use cue::SubtitleCue;
pub use job::{JobAck, JobId, JobRequest, JobStatus, output_filename};
pub use media::MediaSource;
pub use script::{NarrationSegment, Script, VisualCue};
pub use stage::Stage;
