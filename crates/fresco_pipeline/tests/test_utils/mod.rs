//! Fake collaborators and encoder for pipeline tests.
//!
//! Nothing here touches the network or needs ffmpeg: speech returns real
//! WAV bytes so the default prober can measure them, and the encoder just
//! records the timeline it was given.

#![allow(dead_code)]

use async_trait::async_trait;
use fresco_core::{FrescoConfig, MediaSource, NarrationSegment, Script, VisualCue};
use fresco_error::{FrescoResult, GenerationError, GenerationErrorKind};
use fresco_interface::{ImageGenerator, ScriptGenerator, SpeechGenerator};
use fresco_media::{Encoder, Timeline};
use fresco_pipeline::{Collaborators, Orchestrator};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const SAMPLE_RATE: u32 = 8_000;
pub const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Silent mono WAV of `seconds`.
pub fn wav_bytes(seconds: f64) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for _ in 0..(seconds * f64::from(SAMPLE_RATE)) as u32 {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

/// Returns a fixed script, or fails if none is set.
pub struct FakeScript {
    pub script: Option<Script>,
}

impl FakeScript {
    pub fn new(narration: &[&str], prompts: &[&str]) -> Self {
        Self {
            script: Some(Script::new(
                "Tides",
                narration.iter().map(|t| NarrationSegment::new(*t)).collect(),
                prompts.iter().map(|p| VisualCue::new(*p)).collect(),
            )),
        }
    }

    pub fn failing() -> Self {
        Self { script: None }
    }
}

#[async_trait]
impl ScriptGenerator for FakeScript {
    async fn generate(
        &self,
        _topic: &str,
        _duration: u32,
        _key_points: &[String],
    ) -> FrescoResult<Script> {
        self.script.clone().ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::Script("backend unavailable".into())).into()
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

/// PNG bytes for every prompt except those listed as failing.
#[derive(Default)]
pub struct FakeImages {
    pub failing_prompts: HashSet<String>,
    pub empty_prompts: HashSet<String>,
    pub calls: AtomicUsize,
}

impl FakeImages {
    pub fn failing(prompts: &[&str]) -> Self {
        Self {
            failing_prompts: prompts.iter().map(|p| p.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGenerator for FakeImages {
    async fn generate(&self, prompt: &str) -> FrescoResult<Option<MediaSource>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_prompts.contains(prompt) {
            return Err(GenerationError::new(GenerationErrorKind::Image(format!(
                "refused '{}'",
                prompt
            )))
            .into());
        }
        if self.empty_prompts.contains(prompt) {
            return Ok(None);
        }
        Ok(Some(MediaSource::Binary(PNG_MAGIC.to_vec())))
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

/// WAV clips whose length is one second per word, failing listed texts.
#[derive(Default)]
pub struct FakeSpeech {
    pub failing_texts: HashSet<String>,
    pub voices: Mutex<Vec<String>>,
}

impl FakeSpeech {
    pub fn failing(texts: &[&str]) -> Self {
        Self {
            failing_texts: texts.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl SpeechGenerator for FakeSpeech {
    async fn synthesize(&self, text: &str, voice: &str, _speed: f32) -> FrescoResult<Vec<u8>> {
        self.voices.lock().push(voice.to_string());
        if self.failing_texts.contains(text) {
            return Err(GenerationError::new(GenerationErrorKind::Speech("tts down".into())).into());
        }
        Ok(wav_bytes(text.split_whitespace().count() as f64))
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

/// Writes marker files and remembers every timeline.
#[derive(Default)]
pub struct RecordingEncoder {
    pub timelines: Mutex<Vec<Timeline>>,
    pub placeholders: AtomicUsize,
}

#[async_trait]
impl Encoder for RecordingEncoder {
    async fn render_placeholder(&self, _label: &str, output: &Path) -> FrescoResult<PathBuf> {
        std::fs::write(output, PNG_MAGIC).unwrap();
        self.placeholders.fetch_add(1, Ordering::SeqCst);
        Ok(output.to_path_buf())
    }

    async fn encode(&self, timeline: &Timeline, output: &Path) -> FrescoResult<PathBuf> {
        std::fs::create_dir_all(output.parent().unwrap()).unwrap();
        std::fs::write(output, b"fake mp4").unwrap();
        self.timelines.lock().push(timeline.clone());
        Ok(output.to_path_buf())
    }
}

/// Bundled config rooted in `dir`, no inter-call delay.
pub fn test_config(dir: &Path) -> FrescoConfig {
    let mut config = FrescoConfig::bundled().unwrap();
    config.paths.scratch_root = dir.join("jobs");
    config.paths.publish_dir = dir.join("videos");
    config.paths.intro_image = dir.join("intro.jpg");
    config.imaging.inter_call_delay_ms = 0;
    config
}

pub struct Harness {
    pub images: Arc<FakeImages>,
    pub speech: Arc<FakeSpeech>,
    pub encoder: Arc<RecordingEncoder>,
    pub orchestrator: Orchestrator,
}

pub fn harness(
    config: FrescoConfig,
    script: FakeScript,
    images: FakeImages,
    speech: FakeSpeech,
) -> Harness {
    let images = Arc::new(images);
    let speech = Arc::new(speech);
    let encoder = Arc::new(RecordingEncoder::default());
    let collaborators = Collaborators::new(Arc::new(script), images.clone(), speech.clone());
    let orchestrator = Orchestrator::new(config, collaborators, encoder.clone()).unwrap();
    Harness {
        images,
        speech,
        encoder,
        orchestrator,
    }
}
