//! Subtitle cue type.

use serde::{Deserialize, Serialize};

/// A timed subtitle chunk on the composed timeline.
///
/// Times are seconds from the start of the video, so they already include
/// the intro card.
///
/// # Examples
///
/// ```
/// use fresco_core::SubtitleCue;
///
/// let cue = SubtitleCue::new("hello there", 5.0, 7.5);
/// assert_eq!(cue.duration(), 2.5);
/// assert!(cue.is_active_at(5.0));
/// assert!(!cue.is_active_at(7.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct SubtitleCue {
    /// Displayed text
    text: String,
    /// Start time in seconds (inclusive)
    start: f64,
    /// End time in seconds (exclusive)
    end: f64,
}

impl SubtitleCue {
    /// Create a cue.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Seconds the cue stays on screen.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether `t` falls in the half-open window `[start, end)`.
    pub fn is_active_at(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }
}
