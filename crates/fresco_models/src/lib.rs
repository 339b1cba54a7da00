//! HTTP generator backends for Fresco.
//!
//! Each backend posts JSON to an endpoint named in
//! [`ProvidersConfig`](fresco_core::ProvidersConfig) and adapts the reply to
//! one of the collaborator traits in `fresco_interface`. The wire shapes
//! follow the common OpenAI-style conventions, so any compatible gateway
//! works:
//!
//! - script: `POST {topic, duration, key_points}` → script JSON
//!   (`topic`, `audio_script`, `visual_script`)
//! - image: `POST {prompt, n, size}` → `{data: [{url | b64_json}]}`
//! - speech: `POST {input, voice, speed, response_format}` → audio bytes
//!
//! # Example
//!
//! ```no_run
//! use fresco_core::FrescoConfig;
//! use fresco_models::{HttpImageGenerator, HttpScriptGenerator, HttpSpeechGenerator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FrescoConfig::load()?;
//! let script = HttpScriptGenerator::from_config(&config.providers)?;
//! let images = HttpImageGenerator::from_config(&config.providers)?;
//! let speech = HttpSpeechGenerator::from_config(&config.providers)?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod dto;
mod image;
mod script;
mod speech;

pub use client::ProviderClient;
pub use dto::{ImageDatum, ImageRequest, ImageResponse, ScriptRequest, SpeechRequest};
pub use image::HttpImageGenerator;
pub use script::HttpScriptGenerator;
pub use speech::HttpSpeechGenerator;
