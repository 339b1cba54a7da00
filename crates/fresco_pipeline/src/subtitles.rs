//! Narration-to-audio alignment and cue timing for one script.

use fresco_core::{Script, SubtitleCue, TimingConfig};
use fresco_error::FrescoResult;
use fresco_media::{DurationProber, compute_cues};
use fresco_storage::{SegmentKind, list_segments};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Narration clips that survived synthesis, with the text each one speaks.
///
/// `audio[i]` speaks `texts[i]`; both are in segment index order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedNarration {
    /// Audio clip paths
    pub audio: Vec<PathBuf>,
    /// Narration text per clip
    pub texts: Vec<String>,
}

impl AlignedNarration {
    /// Number of aligned clips.
    pub fn len(&self) -> usize {
        self.audio.len()
    }

    /// Whether no clip survived.
    pub fn is_empty(&self) -> bool {
        self.audio.is_empty()
    }

    /// Keep only the first `len` clips and their texts.
    pub fn truncate(&mut self, len: usize) {
        self.audio.truncate(len);
        self.texts.truncate(len);
    }
}

/// Pair each `segment_<n>` clip in `audio_dir` with narration `n` of `script`.
///
/// Clips whose index has no narration segment are ignored, so a skipped
/// synthesis never shifts later captions onto the wrong audio.
///
/// # Errors
///
/// Returns `MediaError::NotFound` if `audio_dir` does not exist.
pub async fn align_narration(script: &Script, audio_dir: &Path) -> FrescoResult<AlignedNarration> {
    let segments = list_segments(SegmentKind::Audio, audio_dir).await?;

    let mut aligned = AlignedNarration {
        audio: Vec::with_capacity(segments.len()),
        texts: Vec::with_capacity(segments.len()),
    };
    for segment in segments {
        let text = segment
            .index
            .value()
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| script.narration.get(i));
        match text {
            Some(text) => {
                aligned.texts.push(text.text.clone());
                aligned.audio.push(segment.path);
            }
            None => warn!(
                path = %segment.path.display(),
                "Audio clip has no matching narration, ignoring"
            ),
        }
    }
    debug!(clips = aligned.audio.len(), "Narration aligned");
    Ok(aligned)
}

/// Probe every clip of `narration` and compute its subtitle cues.
///
/// # Errors
///
/// Propagates probing and timing errors.
pub async fn timed_cues(
    narration: &AlignedNarration,
    prober: &dyn DurationProber,
    timing: &TimingConfig,
) -> FrescoResult<Vec<SubtitleCue>> {
    let mut durations = Vec::with_capacity(narration.audio.len());
    for path in &narration.audio {
        durations.push(prober.probe(path).await?);
    }

    compute_cues(
        narration.texts.as_slice(),
        &durations,
        timing.chunk_size,
        timing.intro_duration,
    )
}

/// Align the clips in `audio_dir`, keep the first `clips` of them (all when
/// `None`), and compute their subtitle cues.
///
/// # Errors
///
/// Propagates alignment, probing, and timing errors.
pub async fn narration_cues(
    script: &Script,
    audio_dir: &Path,
    clips: Option<usize>,
    prober: &dyn DurationProber,
    timing: &TimingConfig,
) -> FrescoResult<(AlignedNarration, Vec<SubtitleCue>)> {
    let mut narration = align_narration(script, audio_dir).await?;
    if let Some(clips) = clips.filter(|c| *c < narration.len()) {
        debug!(aligned = narration.len(), kept = clips, "Dropping unpaired narration");
        narration.truncate(clips);
    }
    let cues = timed_cues(&narration, prober, timing).await?;
    Ok((narration, cues))
}
