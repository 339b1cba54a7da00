//! Errors from the external script, image, and speech generators.

/// Which collaborator failed and why.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Script generator failed or returned unusable data
    #[display("Script generation failed: {}", _0)]
    Script(String),
    /// Image generator failed for one prompt
    #[display("Image generation failed: {}", _0)]
    Image(String),
    /// Speech synthesis failed for one narration segment
    #[display("Speech synthesis failed: {}", _0)]
    Speech(String),
    /// A whole stage produced no artifacts
    #[display("Stage produced no {} (0 of {} succeeded)", artifact, attempted)]
    NothingProduced {
        /// Artifact noun, e.g. "images"
        artifact: String,
        /// How many generator calls were attempted
        attempted: usize,
    },
}

/// Generation error with location tracking.
///
/// # Examples
///
/// ```
/// use fresco_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::NothingProduced {
///     artifact: "images".to_string(),
///     attempted: 4,
/// });
/// assert!(format!("{}", err).contains("0 of 4"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific failure
    pub kind: GenerationErrorKind,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
