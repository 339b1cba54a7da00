//! Filesystem artifacts for Fresco jobs.
//!
//! Three pieces live here:
//!
//! - **Segment store**: lists a job's generated images or audio clips in the
//!   order of the sequence number embedded in each file name, so
//!   `segment_2.wav` always precedes `segment_10.wav`.
//! - **Job workspace**: the per-job scratch tree
//!   (`images/`, `audio/`, `script.json`, `subtitles.srt`, `output/`).
//! - **Publisher**: the flat, append-only directory finished videos are
//!   moved into and served from.
//!
//! # Example
//!
//! ```rust
//! use fresco_storage::{SegmentIndex, segment_index};
//!
//! assert_eq!(segment_index("segment_10"), SegmentIndex::At(10));
//! assert_eq!(segment_index("scene_3-00-05"), SegmentIndex::At(3));
//! assert_eq!(segment_index("cover"), SegmentIndex::Unindexed);
//! assert!(SegmentIndex::At(2) < SegmentIndex::At(10));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod publisher;
mod segment;
mod workspace;

pub use publisher::{Publisher, VIDEO_EXTENSIONS, validate_filename};
pub use segment::{Segment, SegmentIndex, SegmentKind, list, list_segments, segment_index};
pub use workspace::JobWorkspace;
