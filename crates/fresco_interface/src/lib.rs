//! Trait definitions for the Fresco pipeline's external collaborators.
//!
//! The pipeline never talks to a provider directly. It drives a script
//! generator, an image generator, and a speech synthesizer through these
//! traits, so any backend (HTTP service, local model, test fake) can be
//! plugged in.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ImageGenerator, ScriptGenerator, SpeechGenerator};
