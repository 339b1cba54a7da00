//! Error types for the Fresco video pipeline.
//!
//! This crate provides the error types shared by every Fresco crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Leaf components raise the typed errors (`ValidationError`,
//! `GenerationError`, `AlignmentError`, `MediaError`, `AssemblyError`); the
//! orchestrator wraps whatever halts a job in a `PipelineError` naming the
//! stage.
//!
//! # Examples
//!
//! ```
//! use fresco_error::{FrescoResult, ValidationError};
//!
//! fn check_topic(topic: &str) -> FrescoResult<()> {
//!     if topic.trim().is_empty() {
//!         Err(ValidationError::new("topic must not be empty"))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_topic("").is_err());
//! assert!(check_topic("Rust ownership").is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod alignment;
mod assembly;
mod error;
mod generation;
mod media;
mod message;
mod pipeline;
mod storage;

pub use alignment::AlignmentError;
pub use assembly::{AssemblyError, AssemblyErrorKind};
pub use error::{FrescoError, FrescoErrorKind, FrescoResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use media::{MediaError, MediaErrorKind};
pub use message::{ConfigError, HttpError, JsonError, ValidationError};
pub use pipeline::PipelineError;
pub use storage::{StorageError, StorageErrorKind};
