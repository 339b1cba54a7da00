//! Per-job scratch directory.

use fresco_core::Script;
use fresco_error::{FrescoResult, JsonError, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

const IMAGES_DIR: &str = "images";
const AUDIO_DIR: &str = "audio";
const OUTPUT_DIR: &str = "output";
const SCRIPT_FILE: &str = "script.json";
const SUBTITLES_FILE: &str = "subtitles.srt";

/// Scratch tree owned by exactly one job.
///
/// Layout:
///
/// ```text
/// <scratch_root>/<job id>/
/// ├── images/          scene_<n>-<label>.<ext>
/// ├── audio/           segment_<n>.wav
/// ├── script.json
/// ├── subtitles.srt
/// └── output/          <video filename>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobWorkspace {
    root: PathBuf,
}

impl JobWorkspace {
    /// Workspace rooted at `root`. Nothing is created until [`clean`](Self::clean).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generated images.
    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIR)
    }

    /// Synthesized narration clips.
    pub fn audio_dir(&self) -> PathBuf {
        self.root.join(AUDIO_DIR)
    }

    /// Encoder output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    /// Persisted script.
    pub fn script_path(&self) -> PathBuf {
        self.root.join(SCRIPT_FILE)
    }

    /// Persisted subtitle file.
    pub fn subtitles_path(&self) -> PathBuf {
        self.root.join(SUBTITLES_FILE)
    }

    /// Wipe `images/` and `audio/` and recreate them with `output/`.
    ///
    /// Idempotent: missing directories are not an error. The publish
    /// directory lives elsewhere and is never touched.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if a directory cannot be removed or created.
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn clean(&self) -> FrescoResult<()> {
        for dir in [self.images_dir(), self.audio_dir()] {
            remove_dir_if_present(&dir).await?;
        }
        for dir in [self.images_dir(), self.audio_dir(), self.output_dir()] {
            tokio::fs::create_dir_all(&dir).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
            })?;
        }
        tracing::debug!("Workspace cleaned");
        Ok(())
    }

    /// Write `script.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn persist_script(&self, script: &Script) -> FrescoResult<PathBuf> {
        let json = serde_json::to_vec_pretty(script)
            .map_err(|e| JsonError::new(format!("Failed to serialize script: {}", e)))?;
        let path = self.script_path();
        write_file(&path, &json).await?;
        Ok(path)
    }

    /// Read `script.json` back.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the script was never persisted, or
    /// a `JsonError` if it does not parse.
    pub async fn load_script(&self) -> FrescoResult<Script> {
        let path = self.script_path();
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| StorageError::read(&path, e))?;
        let script = serde_json::from_slice(&bytes).map_err(|e| {
            JsonError::new(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(script)
    }

    /// Write `subtitles.srt`.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the write fails.
    pub async fn write_subtitles(&self, srt: &str) -> FrescoResult<PathBuf> {
        let path = self.subtitles_path();
        write_file(&path, srt.as_bytes()).await?;
        Ok(path)
    }

    /// Store an image under `images/`.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the write fails.
    pub async fn write_image(&self, file_name: &str, bytes: &[u8]) -> FrescoResult<PathBuf> {
        let path = self.images_dir().join(file_name);
        write_file(&path, bytes).await?;
        Ok(path)
    }

    /// Store a narration clip under `audio/`.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the write fails.
    pub async fn write_audio(&self, file_name: &str, bytes: &[u8]) -> FrescoResult<PathBuf> {
        let path = self.audio_dir().join(file_name);
        write_file(&path, bytes).await?;
        Ok(path)
    }

    /// Delete the whole workspace. Missing workspaces are not an error.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if removal fails.
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn remove(&self) -> FrescoResult<()> {
        remove_dir_if_present(&self.root).await
    }
}

async fn remove_dir_if_present(dir: &Path) -> FrescoResult<()> {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StorageError::new(StorageErrorKind::Removal(format!(
            "{}: {}",
            dir.display(),
            e
        )))
        .into()),
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> FrescoResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                parent.display(),
                e
            )))
        })?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| StorageError::write(path, e))?;
    Ok(())
}
