//! Media handling for the Fresco pipeline.
//!
//! - [`DurationProber`] implementations read how long a narration clip plays.
//! - [`compute_cues`] maps narration text onto audio durations as subtitle
//!   cues; [`render_srt`] writes those cues as SubRip.
//! - [`Timeline`] is the pure clip list (intro card, one clip per
//!   image/audio pair, outro card) with fades and caption overlays.
//! - [`Assembler`] pairs artifacts into a timeline and hands it to an
//!   [`Encoder`]; [`FfmpegEncoder`] is the production encoder.
//!
//! # Example
//!
//! ```rust
//! use fresco_media::compute_cues;
//!
//! let texts = ["one two three four five"];
//! let cues = compute_cues(&texts, &[10.0], 2, 5.0).unwrap();
//! assert_eq!(cues.len(), 3);
//! assert_eq!(*cues[0].start(), 5.0);
//! assert_eq!(*cues[2].end(), 15.0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod encoder;
mod ffmpeg;
mod probe;
mod srt;
mod timeline;
mod timing;

pub use assembler::{Assembler, AssemblyInputs, paired_count};
pub use encoder::Encoder;
pub use ffmpeg::FfmpegEncoder;
pub use probe::{CachingProber, DefaultProber, DurationProber, FfprobeProber, WavProber};
pub use srt::{format_timestamp, render_srt};
pub use timeline::{Clip, SegmentInput, Timeline, TitleCard, clip_fades};
pub use timing::compute_cues;
