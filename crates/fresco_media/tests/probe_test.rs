//! Tests for duration probers.

use async_trait::async_trait;
use fresco_error::{FrescoErrorKind, FrescoResult};
use fresco_media::{CachingProber, DefaultProber, DurationProber, WavProber};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

fn write_wav(path: &Path, sample_rate: u32, frames: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for _ in 0..frames {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
}

#[tokio::test]
async fn test_wav_duration() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("segment_0.wav");
    write_wav(&path, 8_000, 12_000);

    let seconds = WavProber.probe(&path).await.unwrap();
    assert!((seconds - 1.5).abs() < 1e-9);

    let seconds = DefaultProber::default().probe(&path).await.unwrap();
    assert!((seconds - 1.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = WavProber
        .probe(&dir.path().join("absent.wav"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_garbage_is_unreadable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("segment_0.wav");
    std::fs::write(&path, b"definitely not RIFF").unwrap();

    let err = WavProber.probe(&path).await.unwrap_err();
    assert!(matches!(err.kind(), FrescoErrorKind::Media(_)));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_empty_wav_is_unreadable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("segment_0.wav");
    write_wav(&path, 8_000, 0);

    let err = WavProber.probe(&path).await.unwrap_err();
    assert!(matches!(err.kind(), FrescoErrorKind::Media(_)));
}

struct CountingProber {
    calls: AtomicUsize,
}

#[async_trait]
impl DurationProber for CountingProber {
    async fn probe(&self, _path: &Path) -> FrescoResult<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(2.0)
    }
}

#[tokio::test]
async fn test_caching_prober_decodes_once_per_path() {
    let prober = CachingProber::new(CountingProber {
        calls: AtomicUsize::new(0),
    });
    let a = PathBuf::from("a.wav");
    let b = PathBuf::from("b.wav");

    assert_eq!(prober.probe(&a).await.unwrap(), 2.0);
    assert_eq!(prober.probe(&a).await.unwrap(), 2.0);
    assert_eq!(prober.probe(&b).await.unwrap(), 2.0);

    assert_eq!(prober.cached(), 2);
    assert_eq!(prober.inner().calls.load(Ordering::SeqCst), 2);
}
