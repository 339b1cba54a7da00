//! Structured script produced by the script generator.

use fresco_error::{FrescoResult, ValidationError};
use serde::{Deserialize, Serialize};

/// One spoken line of narration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrationSegment {
    /// Speaker role, e.g. "default", "narrator_male", "narrator_female"
    #[serde(default = "default_speaker")]
    pub speaker: String,
    /// Text to synthesize and caption
    pub text: String,
    /// Target speech rate multiplier
    #[serde(default = "default_speed")]
    pub speed: f32,
}

fn default_speaker() -> String {
    "default".to_string()
}

fn default_speed() -> f32 {
    1.0
}

impl NarrationSegment {
    /// Narration with the default speaker at normal speed.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            speaker: default_speaker(),
            text: text.into(),
            speed: default_speed(),
        }
    }
}

/// One image to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualCue {
    /// Image generation prompt
    #[serde(default)]
    pub prompt: String,
    /// Nominal timestamp label such as "00:05"
    #[serde(rename = "timestamp_start", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl VisualCue {
    /// Cue with a prompt and no timestamp label.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            timestamp: None,
        }
    }

    /// Label used in the image file name: the timestamp with every character
    /// outside `[A-Za-z0-9-]` replaced by `-`, or the zero-padded cue
    /// position.
    ///
    /// The label never contains `_`, path separators or dots, so the
    /// `scene_<n>-<label>` name always parses back to index `n` and stays
    /// inside the images directory.
    pub fn file_label(&self, position: usize) -> String {
        match &self.timestamp {
            Some(ts) if !ts.trim().is_empty() => ts
                .trim()
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
                .collect(),
            _ => format!("{:03}", position),
        }
    }
}

/// Narration and visual sequences for one video.
///
/// Serialized with the field names the persisted `script.json` uses:
/// `topic`, `audio_script`, `visual_script`.
///
/// # Examples
///
/// ```
/// use fresco_core::{NarrationSegment, Script, VisualCue};
///
/// let script = Script::new(
///     "Tides",
///     vec![NarrationSegment::new("The moon pulls the ocean.")],
///     vec![VisualCue::new("moon over the sea")],
/// );
/// assert!(script.validate().is_ok());
/// assert_eq!(script.visuals[0].file_label(0), "000");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Topic shown on the intro card
    #[serde(default)]
    pub topic: String,
    /// Ordered narration segments
    #[serde(rename = "audio_script", default)]
    pub narration: Vec<NarrationSegment>,
    /// Ordered visual cues
    #[serde(rename = "visual_script", default)]
    pub visuals: Vec<VisualCue>,
}

impl Script {
    /// Build a script from its parts.
    pub fn new(
        topic: impl Into<String>,
        narration: Vec<NarrationSegment>,
        visuals: Vec<VisualCue>,
    ) -> Self {
        Self {
            topic: topic.into(),
            narration,
            visuals,
        }
    }

    /// Check the fields later stages depend on.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if there is no narration or a speech rate
    /// is not a positive finite number.
    pub fn validate(&self) -> FrescoResult<()> {
        if self.narration.is_empty() {
            return Err(ValidationError::new("script has no narration segments (audio_script)").into());
        }
        if let Some((idx, seg)) = self
            .narration
            .iter()
            .enumerate()
            .find(|(_, s)| !(s.speed.is_finite() && s.speed > 0.0))
        {
            return Err(ValidationError::new(format!(
                "narration segment {} has invalid speed {}",
                idx, seg.speed
            ))
            .into());
        }
        Ok(())
    }
}
