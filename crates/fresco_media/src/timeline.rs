//! Pure timeline model.
//!
//! A [`Timeline`] is everything the encoder needs to know about clip order,
//! clip lengths, fades and captions, with no I/O. Timing can be checked
//! without ever running an encoder.

use derive_getters::Getters;
use fresco_core::SubtitleCue;
use std::path::PathBuf;

/// A full-frame text card (intro or outro).
#[derive(Debug, Clone, PartialEq)]
pub struct TitleCard {
    /// Centered text
    pub text: String,
    /// Background image; `None` renders a solid black frame
    pub background: Option<PathBuf>,
    /// Seconds on screen
    pub duration: f64,
}

/// One image held for the length of its narration clip.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentInput {
    /// Still image
    pub image: PathBuf,
    /// Narration audio
    pub audio: PathBuf,
    /// Probed audio length in seconds
    pub duration: f64,
}

/// One entry of the timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Clip {
    /// Silent title card
    Card(TitleCard),
    /// Image with narration, faded in and out
    Segment {
        /// Image, audio, and length
        input: SegmentInput,
        /// Fade-in seconds
        fade_in: f64,
        /// Fade-out seconds
        fade_out: f64,
    },
}

impl Clip {
    /// Seconds this clip occupies.
    pub fn duration(&self) -> f64 {
        match self {
            Clip::Card(card) => card.duration,
            Clip::Segment { input, .. } => input.duration,
        }
    }
}

/// Fade lengths for a clip of `duration` seconds with nominal `fade`.
///
/// When `2 × fade` would exceed the clip, both fades shrink to half the
/// clip so they never overlap past its end.
///
/// ```
/// use fresco_media::clip_fades;
///
/// assert_eq!(clip_fades(4.0, 1.0), (1.0, 1.0));
/// assert_eq!(clip_fades(1.5, 1.0), (0.75, 0.75));
/// ```
pub fn clip_fades(duration: f64, fade: f64) -> (f64, f64) {
    let fade = fade.max(0.0);
    if 2.0 * fade <= duration {
        (fade, fade)
    } else {
        let half = duration.max(0.0) / 2.0;
        (half, half)
    }
}

/// Ordered, gapless clip list plus caption overlays on the global clock.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Timeline {
    /// Intro, segments in index order, outro
    clips: Vec<Clip>,
    /// Cues active in `[start, end)` of the composed video
    captions: Vec<SubtitleCue>,
}

impl Timeline {
    /// Compose `[intro] + segments + [outro]`.
    ///
    /// Every segment clip gets fades from [`clip_fades`]. Cards carry no
    /// fades. Captions are confined to the segment span: cues starting at
    /// or after the last segment ends are dropped and a cue running past
    /// it is cut at that point, so no caption is drawn over the outro.
    pub fn compose(
        intro: TitleCard,
        segments: Vec<SegmentInput>,
        outro: TitleCard,
        fade: f64,
        captions: Vec<SubtitleCue>,
    ) -> Self {
        let segments_end = intro.duration + segments.iter().map(|s| s.duration).sum::<f64>();
        let captions = captions
            .into_iter()
            .filter(|cue| *cue.start() < segments_end)
            .map(|cue| {
                if *cue.end() > segments_end {
                    SubtitleCue::new(cue.text().clone(), *cue.start(), segments_end)
                } else {
                    cue
                }
            })
            .collect();

        let mut clips = Vec::with_capacity(segments.len() + 2);
        clips.push(Clip::Card(intro));
        clips.extend(segments.into_iter().map(|input| {
            let (fade_in, fade_out) = clip_fades(input.duration, fade);
            Clip::Segment {
                input,
                fade_in,
                fade_out,
            }
        }));
        clips.push(Clip::Card(outro));
        Self { clips, captions }
    }

    /// Sum of clip durations.
    pub fn total_duration(&self) -> f64 {
        self.clips.iter().map(Clip::duration).sum()
    }

    /// Start time of each clip on the composed clock.
    pub fn clip_starts(&self) -> Vec<f64> {
        let mut t = 0.0;
        self.clips
            .iter()
            .map(|clip| {
                let start = t;
                t += clip.duration();
                start
            })
            .collect()
    }

    /// Number of image/audio clips, excluding the cards.
    pub fn segment_count(&self) -> usize {
        self.clips
            .iter()
            .filter(|c| matches!(c, Clip::Segment { .. }))
            .count()
    }
}
