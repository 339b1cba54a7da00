//! Top-level error wrapper types.

use crate::{
    AlignmentError, AssemblyError, ConfigError, GenerationError, HttpError, JsonError, MediaError,
    PipelineError, StorageError, ValidationError,
};

/// Every error condition a Fresco component can raise.
///
/// # Examples
///
/// ```
/// use fresco_error::{FrescoError, FrescoErrorKind, ValidationError};
///
/// let err: FrescoError = ValidationError::new("duration out of range").into();
/// assert!(matches!(err.kind(), FrescoErrorKind::Validation(_)));
/// assert!(format!("{}", err).contains("Validation Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FrescoErrorKind {
    /// Malformed or missing required input
    #[from(ValidationError)]
    Validation(ValidationError),
    /// An external generator call failed
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Narration texts and audio durations do not line up
    #[from(AlignmentError)]
    Alignment(AlignmentError),
    /// Media artifact missing or undecodable
    #[from(MediaError)]
    Media(MediaError),
    /// Timeline composition or encoding failed
    #[from(AssemblyError)]
    Assembly(AssemblyError),
    /// A pipeline stage halted the job
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Filesystem storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Fresco error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fresco_error::{ConfigError, FrescoResult};
///
/// fn might_fail() -> FrescoResult<()> {
///     Err(ConfigError::new("chunk_size must be at least 1"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fresco Error: {}", _0)]
pub struct FrescoError(Box<FrescoErrorKind>);

impl FrescoError {
    /// Create a new error from a kind.
    pub fn new(kind: FrescoErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FrescoErrorKind {
        &self.0
    }

    /// Whether this error means a requested artifact or folder does not exist.
    pub fn is_not_found(&self) -> bool {
        match self.kind() {
            FrescoErrorKind::Media(e) => matches!(e.kind, crate::MediaErrorKind::NotFound(_)),
            FrescoErrorKind::Storage(e) => matches!(e.kind, crate::StorageErrorKind::NotFound(_)),
            _ => false,
        }
    }
}

// Generic From implementation for any type that converts to FrescoErrorKind
impl<T> From<T> for FrescoError
where
    T: Into<FrescoErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fresco operations.
pub type FrescoResult<T> = std::result::Result<T, FrescoError>;
