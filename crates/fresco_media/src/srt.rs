//! SubRip rendering.

use fresco_core::SubtitleCue;
use std::fmt::Write;

/// Format seconds as `HH:MM:SS,mmm`, rounded to the millisecond.
///
/// ```
/// use fresco_media::format_timestamp;
///
/// assert_eq!(format_timestamp(5.0), "00:00:05,000");
/// assert_eq!(format_timestamp(3725.5), "01:02:05,500");
/// ```
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let s = (total_ms / 1000) % 60;
    let m = (total_ms / 60_000) % 60;
    let h = total_ms / 3_600_000;
    format!("{:02}:{:02}:{:02},{:03}", h, m, s, ms)
}

/// Render cues as an SRT document with 1-based numbering.
pub fn render_srt(cues: &[SubtitleCue]) -> String {
    let mut out = String::new();
    for (i, cue) in cues.iter().enumerate() {
        // Writing to a String cannot fail
        let _ = write!(
            out,
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_timestamp(*cue.start()),
            format_timestamp(*cue.end()),
            cue.text()
        );
    }
    out
}
