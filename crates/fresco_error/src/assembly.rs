//! Timeline assembly errors.

/// First unrecoverable failure hit while composing or encoding a video.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AssemblyErrorKind {
    /// A required input path does not exist
    #[display("Missing required input: {}", _0)]
    MissingInput(String),
    /// There were no audio segments to build clips from
    #[display("No segments to assemble")]
    NoSegments,
    /// An audio segment could not be probed
    #[display("Segment media failed: {}", _0)]
    Media(String),
    /// The encoder failed or could not be launched
    #[display("Encoding failed: {}", _0)]
    Encode(String),
    /// Filesystem failure around the output file
    #[display("Output error: {}", _0)]
    Output(String),
}

/// Assembly error with location tracking.
///
/// # Examples
///
/// ```
/// use fresco_error::{AssemblyError, AssemblyErrorKind};
///
/// let err = AssemblyError::new(AssemblyErrorKind::NoSegments);
/// assert!(format!("{}", err).contains("No segments"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Assembly Error: {} at line {} in {}", kind, line, file)]
pub struct AssemblyError {
    /// The kind of error that occurred
    pub kind: AssemblyErrorKind,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl AssemblyError {
    /// Create a new assembly error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AssemblyErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
