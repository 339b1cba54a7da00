//! Stage failures recorded by the orchestrator.

/// A pipeline stage failed and halted its job.
///
/// `cause` is the rendered message of the underlying error so the job status
/// can report it without holding the original error.
///
/// # Examples
///
/// ```
/// use fresco_error::PipelineError;
///
/// let err = PipelineError::new("imaging", "Stage produced no images (0 of 3 succeeded)");
/// assert_eq!(err.stage, "imaging");
/// assert!(format!("{}", err).contains("stage 'imaging' failed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: stage '{}' failed: {} at line {} in {}", stage, cause, line, file)]
pub struct PipelineError {
    /// Name of the stage that failed
    pub stage: String,
    /// Human-readable cause
    pub cause: String,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new pipeline error with automatic location tracking.
    #[track_caller]
    pub fn new(stage: impl Into<String>, cause: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            stage: stage.into(),
            cause: cause.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
