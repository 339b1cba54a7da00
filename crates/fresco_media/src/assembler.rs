//! Pairs generated artifacts into a timeline and encodes it.

use crate::{DurationProber, Encoder, SegmentInput, Timeline, TitleCard};
use fresco_core::{FrescoConfig, SubtitleCue};
use fresco_error::{AssemblyError, AssemblyErrorKind, FrescoResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const PLACEHOLDER_FILE: &str = "placeholder.png";

/// Everything one assembly run consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblyInputs {
    /// Text of the intro card
    pub title: String,
    /// Images in segment order
    pub visuals: Vec<PathBuf>,
    /// Narration clips in segment order
    pub audio: Vec<PathBuf>,
    /// Cues on the composed clock; drawn only when captions are enabled
    pub captions: Vec<SubtitleCue>,
}

/// Number of image/audio clips a timeline is built from.
///
/// Images and audio pair positionally, truncated to the shorter list; with
/// no images every audio clip pairs with the placeholder frame.
///
/// ```
/// use fresco_media::paired_count;
///
/// assert_eq!(paired_count(1, 3), 1);
/// assert_eq!(paired_count(4, 2), 2);
/// assert_eq!(paired_count(0, 3), 3);
/// ```
pub fn paired_count(visuals: usize, audio: usize) -> usize {
    if visuals == 0 {
        audio
    } else {
        visuals.min(audio)
    }
}

/// Builds timelines from job artifacts and renders them.
#[derive(Clone)]
pub struct Assembler {
    intro_duration: f64,
    outro_duration: f64,
    fade: f64,
    burn_captions: bool,
    outro_text: String,
    placeholder_label: String,
    intro_image: PathBuf,
    encoder: Arc<dyn Encoder>,
}

impl Assembler {
    /// Assembler using `config`'s timing and video settings.
    pub fn new(config: &FrescoConfig, encoder: Arc<dyn Encoder>) -> Self {
        Self {
            intro_duration: config.timing.intro_duration,
            outro_duration: config.timing.outro_duration,
            fade: config.video.fade,
            burn_captions: config.video.burn_captions,
            outro_text: config.video.outro_text.clone(),
            placeholder_label: config.video.placeholder_label.clone(),
            intro_image: config.paths.intro_image.clone(),
            encoder,
        }
    }

    fn card(&self, text: &str, duration: f64, background: Option<&Path>) -> TitleCard {
        TitleCard {
            text: text.to_string(),
            background: background.map(Path::to_path_buf),
            duration,
        }
    }

    /// Build the timeline for `inputs` without encoding it.
    ///
    /// Images and audio pair positionally, truncated to the shorter list.
    /// With no images at all, one placeholder frame is rendered into
    /// `scratch` and reused for every audio clip.
    ///
    /// # Errors
    ///
    /// Returns an `AssemblyError` if there is no audio, an input file is
    /// missing, a clip cannot be probed, or the placeholder cannot be made.
    #[tracing::instrument(skip_all, fields(visuals = inputs.visuals.len(), audio = inputs.audio.len()))]
    pub async fn plan(
        &self,
        inputs: &AssemblyInputs,
        prober: &dyn DurationProber,
        scratch: &Path,
    ) -> FrescoResult<Timeline> {
        if inputs.audio.is_empty() {
            return Err(AssemblyError::new(AssemblyErrorKind::NoSegments).into());
        }
        for path in inputs.audio.iter().chain(&inputs.visuals) {
            if !tokio::fs::try_exists(path).await.unwrap_or(false) {
                return Err(AssemblyError::new(AssemblyErrorKind::MissingInput(
                    path.display().to_string(),
                ))
                .into());
            }
        }

        let visuals = if inputs.visuals.is_empty() {
            tracing::warn!("No images available, using placeholder frame");
            tokio::fs::create_dir_all(scratch).await.map_err(|e| {
                AssemblyError::new(AssemblyErrorKind::Output(format!(
                    "{}: {}",
                    scratch.display(),
                    e
                )))
            })?;
            let placeholder = self
                .encoder
                .render_placeholder(&self.placeholder_label, &scratch.join(PLACEHOLDER_FILE))
                .await?;
            vec![placeholder; inputs.audio.len()]
        } else {
            inputs.visuals.clone()
        };

        let paired = paired_count(visuals.len(), inputs.audio.len());
        if paired < inputs.audio.len() || paired < visuals.len() {
            tracing::warn!(
                visuals = visuals.len(),
                audio = inputs.audio.len(),
                paired,
                "Image and audio counts differ, truncating"
            );
        }

        let mut segments = Vec::with_capacity(paired);
        for (image, audio) in visuals.into_iter().zip(&inputs.audio) {
            let duration = prober.probe(audio).await.map_err(|e| {
                AssemblyError::new(AssemblyErrorKind::Media(e.to_string()))
            })?;
            segments.push(SegmentInput {
                image,
                audio: audio.clone(),
                duration,
            });
        }

        let background = if tokio::fs::try_exists(&self.intro_image).await.unwrap_or(false) {
            Some(self.intro_image.as_path())
        } else {
            tracing::warn!(
                path = %self.intro_image.display(),
                "Intro image missing, title cards use a black background"
            );
            None
        };

        let captions = if self.burn_captions {
            inputs.captions.clone()
        } else {
            Vec::new()
        };

        Ok(Timeline::compose(
            self.card(&inputs.title, self.intro_duration, background),
            segments,
            self.card(&self.outro_text, self.outro_duration, background),
            self.fade,
            captions,
        ))
    }

    /// Plan and encode into `output`.
    ///
    /// The placeholder frame, if needed, is rendered next to `output`.
    ///
    /// # Errors
    ///
    /// Returns an `AssemblyError` wrapping the first unrecoverable cause.
    pub async fn assemble(
        &self,
        inputs: &AssemblyInputs,
        prober: &dyn DurationProber,
        output: &Path,
    ) -> FrescoResult<PathBuf> {
        let scratch = output.parent().unwrap_or_else(|| Path::new("."));
        let timeline = self.plan(inputs, prober, scratch).await?;
        tracing::info!(
            clips = timeline.clips().len(),
            duration = timeline.total_duration(),
            "Timeline planned"
        );
        self.encoder.encode(&timeline, output).await
    }
}
