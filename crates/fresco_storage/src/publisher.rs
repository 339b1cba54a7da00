//! Durable, flat output directory for finished videos.

use fresco_error::{FrescoResult, StorageError, StorageErrorKind, ValidationError};
use std::path::{Path, PathBuf};

/// Extensions listed as published videos.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mov", "avi"];

/// Reject names that could escape the publish directory.
///
/// # Errors
///
/// Returns a `ValidationError` for empty names or names containing `/`,
/// `\`, or `..`.
pub fn validate_filename(name: &str) -> FrescoResult<()> {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(ValidationError::new(format!("invalid file name '{}'", name)).into());
    }
    Ok(())
}

/// The publish directory.
///
/// Append-only by unique filename: jobs never share a name, so no lock is
/// needed. Files land via temp file + rename, so readers never see a
/// partially copied video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publisher {
    dir: PathBuf,
}

impl Publisher {
    /// Publisher over `dir`. The directory is created on first publish.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Publish directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `file_name` is (or will be) published.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Copy `source` into the publish directory as `file_name`.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for an unsafe name or a `StorageError`
    /// if the copy or rename fails.
    #[tracing::instrument(skip(self, source), fields(source = %source.display(), dir = %self.dir.display()))]
    pub async fn publish(&self, source: &Path, file_name: &str) -> FrescoResult<PathBuf> {
        validate_filename(file_name)?;

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                self.dir.display(),
                e
            )))
        })?;

        let target = self.path_for(file_name);
        let temp = self.dir.join(format!(".{}.tmp", file_name));

        if let Err(e) = tokio::fs::copy(source, &temp).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(StorageError::read(source, e).into());
        }

        if let Err(e) = tokio::fs::rename(&temp, &target).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp.display(),
                target.display(),
                e
            )))
            .into());
        }

        tracing::info!(path = %target.display(), "Published video");
        Ok(target)
    }

    /// Published video file names, sorted.
    ///
    /// A publish directory that does not exist yet lists as empty.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the directory cannot be read.
    pub async fn list_published(&self) -> FrescoResult<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::read(&self.dir, e).into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::read(&self.dir, e))?
        {
            let path = entry.path();
            let is_video = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| VIDEO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if is_video && let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Path of a published video.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for an unsafe name and
    /// `StorageError::NotFound` if no such file was published.
    pub async fn retrieve(&self, file_name: &str) -> FrescoResult<PathBuf> {
        validate_filename(file_name)?;
        let path = self.path_for(file_name);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(StorageError::new(StorageErrorKind::NotFound(file_name.to_string())).into()),
            Err(e) => Err(StorageError::read(&path, e).into()),
        }
    }
}
