//! Collaborator traits.

use async_trait::async_trait;
use fresco_core::{MediaSource, Script};
use fresco_error::FrescoResult;

/// Produces a structured script from a topic.
#[async_trait]
pub trait ScriptGenerator: Send + Sync {
    /// Generate narration and visual cues for `topic`.
    ///
    /// `duration` is the requested video length in seconds; the generator
    /// should size the narration accordingly.
    ///
    /// # Errors
    ///
    /// Returns a `GenerationError` if no usable script is produced.
    async fn generate(
        &self,
        topic: &str,
        duration: u32,
        key_points: &[String],
    ) -> FrescoResult<Script>;

    /// Backend name for logs (e.g., "http", "fake").
    fn provider_name(&self) -> &'static str;
}

/// Produces one image per prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate an image for `prompt`.
    ///
    /// `Ok(None)` means the backend declined or returned nothing usable; the
    /// pipeline treats it as a skipped cue, not a failure.
    async fn generate(&self, prompt: &str) -> FrescoResult<Option<MediaSource>>;

    /// Backend name for logs.
    fn provider_name(&self) -> &'static str;
}

/// Synthesizes narration audio.
#[async_trait]
pub trait SpeechGenerator: Send + Sync {
    /// Speak `text` with `voice` at `speed` (1.0 is normal rate).
    ///
    /// Returns encoded audio bytes, WAV unless the backend says otherwise.
    async fn synthesize(&self, text: &str, voice: &str, speed: f32) -> FrescoResult<Vec<u8>>;

    /// Backend name for logs.
    fn provider_name(&self) -> &'static str;
}
