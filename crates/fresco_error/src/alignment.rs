//! Text/duration alignment errors raised by the subtitle timing engine.

/// Narration texts and audio durations are not index-aligned.
///
/// Always fatal: it means an upstream stage broke its contract.
///
/// # Examples
///
/// ```
/// use fresco_error::AlignmentError;
///
/// let err = AlignmentError::new(3, 2);
/// assert_eq!(err.texts, 3);
/// assert!(format!("{}", err).contains("3 narration texts but 2 audio durations"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Alignment Error: {} narration texts but {} audio durations at line {} in {}",
    texts,
    durations,
    line,
    file
)]
pub struct AlignmentError {
    /// Number of narration texts supplied
    pub texts: usize,
    /// Number of audio durations supplied
    pub durations: usize,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl AlignmentError {
    /// Create a new alignment error with automatic location tracking.
    #[track_caller]
    pub fn new(texts: usize, durations: usize) -> Self {
        let location = std::panic::Location::caller();
        Self {
            texts,
            durations,
            line: location.line(),
            file: location.file(),
        }
    }
}
