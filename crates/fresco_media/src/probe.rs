//! Audio duration probing.

use async_trait::async_trait;
use fresco_error::{FrescoResult, MediaError, MediaErrorKind};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Reads how long an audio artifact plays.
#[async_trait]
pub trait DurationProber: Send + Sync {
    /// Playable length of `path` in seconds, always positive.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::NotFound` if the file does not exist and
    /// `MediaError::Unreadable` if it cannot be decoded or has no length.
    async fn probe(&self, path: &Path) -> FrescoResult<f64>;
}

#[async_trait]
impl<P: DurationProber + ?Sized> DurationProber for Arc<P> {
    async fn probe(&self, path: &Path) -> FrescoResult<f64> {
        (**self).probe(path).await
    }
}

fn unreadable(path: &Path, reason: impl std::fmt::Display) -> MediaError {
    MediaError::new(MediaErrorKind::Unreadable(format!(
        "{}: {}",
        path.display(),
        reason
    )))
}

async fn ensure_exists(path: &Path) -> FrescoResult<()> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(unreadable(path, "not a regular file").into()),
        Err(_) => Err(MediaError::new(MediaErrorKind::NotFound(path.display().to_string())).into()),
    }
}

fn positive(path: &Path, seconds: f64) -> FrescoResult<f64> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(seconds)
    } else {
        Err(unreadable(path, format!("non-positive duration {}", seconds)).into())
    }
}

/// Decodes the RIFF header of a WAV file.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavProber;

#[async_trait]
impl DurationProber for WavProber {
    async fn probe(&self, path: &Path) -> FrescoResult<f64> {
        ensure_exists(path).await?;
        let owned = path.to_path_buf();
        let seconds = tokio::task::spawn_blocking(move || {
            let reader = hound::WavReader::open(&owned).map_err(|e| unreadable(&owned, e))?;
            let rate = reader.spec().sample_rate;
            if rate == 0 {
                return Err(unreadable(&owned, "sample rate is zero"));
            }
            Ok(f64::from(reader.duration()) / f64::from(rate))
        })
        .await
        .map_err(|e| unreadable(path, e))??;
        positive(path, seconds)
    }
}

/// Asks `ffprobe` for the container duration.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    program: PathBuf,
}

impl FfprobeProber {
    /// Prober running `program` instead of `ffprobe` from `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self::with_program("ffprobe")
    }
}

#[async_trait]
impl DurationProber for FfprobeProber {
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    async fn probe(&self, path: &Path) -> FrescoResult<f64> {
        ensure_exists(path).await?;
        let output = tokio::process::Command::new(&self.program)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .output()
            .await
            .map_err(|e| unreadable(path, format!("failed to run {}: {}", self.program.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(unreadable(path, stderr.trim()).into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let seconds: f64 = stdout
            .trim()
            .parse()
            .map_err(|_| unreadable(path, format!("unexpected ffprobe output '{}'", stdout.trim())))?;
        positive(path, seconds)
    }
}

/// WAV header decoding for `.wav`, `ffprobe` for everything else.
#[derive(Debug, Clone, Default)]
pub struct DefaultProber {
    wav: WavProber,
    ffprobe: FfprobeProber,
}

#[async_trait]
impl DurationProber for DefaultProber {
    async fn probe(&self, path: &Path) -> FrescoResult<f64> {
        let is_wav = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("wav"));
        if is_wav {
            self.wav.probe(path).await
        } else {
            self.ffprobe.probe(path).await
        }
    }
}

/// Remembers each path's duration so a clip is decoded at most once.
///
/// Create one per job run; the timing stage and the assembler share it.
pub struct CachingProber<P> {
    inner: P,
    cache: Mutex<HashMap<PathBuf, f64>>,
}

impl<P: DurationProber> CachingProber<P> {
    /// Wrap `inner` with an empty cache.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The wrapped prober.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Number of cached durations.
    pub fn cached(&self) -> usize {
        self.cache.lock().len()
    }
}

#[async_trait]
impl<P: DurationProber> DurationProber for CachingProber<P> {
    async fn probe(&self, path: &Path) -> FrescoResult<f64> {
        let cached = self.cache.lock().get(path).copied();
        if let Some(seconds) = cached {
            tracing::trace!(path = %path.display(), seconds, "Duration cache hit");
            return Ok(seconds);
        }
        let seconds = self.inner.probe(path).await?;
        self.cache.lock().insert(path.to_path_buf(), seconds);
        tracing::debug!(path = %path.display(), seconds, "Probed duration");
        Ok(seconds)
    }
}
