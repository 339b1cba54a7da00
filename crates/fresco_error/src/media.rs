//! Media artifact errors.

/// Kinds of media errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum MediaErrorKind {
    /// Artifact or segment folder does not exist
    #[display("Not found: {}", _0)]
    NotFound(String),
    /// Artifact exists but cannot be decoded
    #[display("Unreadable media: {}", _0)]
    Unreadable(String),
}

/// Media error with location tracking.
///
/// # Examples
///
/// ```
/// use fresco_error::{MediaError, MediaErrorKind};
///
/// let err = MediaError::new(MediaErrorKind::Unreadable("segment_0.wav: bad RIFF header".into()));
/// assert!(format!("{}", err).contains("Unreadable"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Media Error: {} at line {} in {}", kind, line, file)]
pub struct MediaError {
    /// The kind of error that occurred
    pub kind: MediaErrorKind,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl MediaError {
    /// Create a new media error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MediaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
