//! Subtitle timing.
//!
//! One routine turns narration texts and their audio durations into cues.
//! Both the SRT writer and the burned-in caption overlay consume its output,
//! so the two can never disagree.

use fresco_core::SubtitleCue;
use fresco_error::{AlignmentError, FrescoResult, ValidationError};

/// Compute subtitle cues on the composed video's clock.
///
/// `texts[i]` is narrated over `durations[i]` seconds. Each text is split on
/// whitespace into chunks of at most `chunk_size` words; a chunk of `wc`
/// words out of `W` gets `duration × wc / W` seconds. The clock starts at
/// `intro_offset` and every cue starts where the previous one ended.
///
/// The last chunk of each segment ends exactly at `intro_offset` plus the
/// running sum of durations, so rounding never drifts across segments. An
/// empty text still produces one empty cue covering its duration.
///
/// # Errors
///
/// Returns an `AlignmentError` if the slices differ in length, and a
/// `ValidationError` for `chunk_size == 0` or a negative or non-finite
/// duration.
pub fn compute_cues<S: AsRef<str>>(
    texts: &[S],
    durations: &[f64],
    chunk_size: usize,
    intro_offset: f64,
) -> FrescoResult<Vec<SubtitleCue>> {
    if texts.len() != durations.len() {
        return Err(AlignmentError::new(texts.len(), durations.len()).into());
    }
    if chunk_size == 0 {
        return Err(ValidationError::new("chunk_size must be at least 1").into());
    }
    if let Some(bad) = durations.iter().find(|d| !(d.is_finite() && **d >= 0.0)) {
        return Err(ValidationError::new(format!("invalid segment duration {}", bad)).into());
    }

    let mut cues = Vec::new();
    let mut elapsed = 0.0;

    for (text, &duration) in texts.iter().zip(durations) {
        let start = intro_offset + elapsed;
        elapsed += duration;
        let boundary = intro_offset + elapsed;

        let words: Vec<&str> = text.as_ref().split_whitespace().collect();
        if words.len() <= chunk_size {
            cues.push(SubtitleCue::new(words.join(" "), start, boundary));
            continue;
        }

        let total = words.len() as f64;
        let chunks: Vec<&[&str]> = words.chunks(chunk_size).collect();
        let last = chunks.len() - 1;
        let mut cursor = start;
        for (i, chunk) in chunks.into_iter().enumerate() {
            let end = if i == last {
                boundary
            } else {
                cursor + duration * chunk.len() as f64 / total
            };
            cues.push(SubtitleCue::new(chunk.join(" "), cursor, end));
            cursor = end;
        }
    }

    tracing::debug!(
        segments = texts.len(),
        cues = cues.len(),
        end = intro_offset + elapsed,
        "Computed subtitle cues"
    );
    Ok(cues)
}
