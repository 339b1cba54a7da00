//! The external generators one orchestrator drives.

use fresco_interface::{ImageGenerator, ScriptGenerator, SpeechGenerator};
use std::sync::Arc;

/// Script, image, and speech backends.
#[derive(Clone)]
pub struct Collaborators {
    /// Produces the structured script
    pub script: Arc<dyn ScriptGenerator>,
    /// Produces one image per visual cue
    pub image: Arc<dyn ImageGenerator>,
    /// Produces one clip per narration segment
    pub speech: Arc<dyn SpeechGenerator>,
}

impl Collaborators {
    /// Bundle the three backends.
    pub fn new(
        script: Arc<dyn ScriptGenerator>,
        image: Arc<dyn ImageGenerator>,
        speech: Arc<dyn SpeechGenerator>,
    ) -> Self {
        Self {
            script,
            image,
            speech,
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("script", &self.script.provider_name())
            .field("image", &self.image.provider_name())
            .field("speech", &self.speech.provider_name())
            .finish()
    }
}
