//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create a directory
    #[display("Failed to create directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to read file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// Failed to remove a file or directory
    #[display("Failed to remove: {}", _0)]
    Removal(String),
    /// Artifact not found in the publish directory
    #[display("Not found: {}", _0)]
    NotFound(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use fresco_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("intro_1700000000.mp4".to_string()));
/// assert!(format!("{}", err).contains("Not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Wrap an I/O failure on `path` as a read error, mapping missing files to `NotFound`.
    #[track_caller]
    pub fn read(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::new(StorageErrorKind::NotFound(path.display().to_string()))
        } else {
            Self::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), err)))
        }
    }

    /// Wrap an I/O failure on `path` as a write error.
    #[track_caller]
    pub fn write(path: &std::path::Path, err: std::io::Error) -> Self {
        Self::new(StorageErrorKind::FileWrite(format!("{}: {}", path.display(), err)))
    }
}
