//! Wiring production components together.

use fresco_core::{FrescoConfig, ProvidersConfig, Script, TimingConfig};
use fresco_error::{FrescoResult, JsonError, StorageError};
use fresco_media::{DurationProber, FfmpegEncoder, render_srt};
use fresco_models::{HttpImageGenerator, HttpScriptGenerator, HttpSpeechGenerator};
use fresco_pipeline::{Collaborators, Orchestrator, narration_cues};
use fresco_storage::{SegmentKind, list};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// HTTP backends for every collaborator, from `providers`.
///
/// # Errors
///
/// Returns a `ConfigError` naming the first endpoint that is not set.
pub fn http_collaborators(providers: &ProvidersConfig) -> FrescoResult<Collaborators> {
    Ok(Collaborators::new(
        Arc::new(HttpScriptGenerator::from_config(providers)?),
        Arc::new(HttpImageGenerator::from_config(providers)?),
        Arc::new(HttpSpeechGenerator::from_config(providers)?),
    ))
}

/// Orchestrator over HTTP backends and the ffmpeg encoder.
///
/// # Errors
///
/// Returns a `ConfigError` if a provider endpoint is missing.
pub fn build_orchestrator(config: FrescoConfig) -> FrescoResult<Orchestrator> {
    let collaborators = http_collaborators(&config.providers)?;
    let encoder = Arc::new(FfmpegEncoder::new(
        config.video.clone(),
        config.paths.font.clone(),
    ));
    Orchestrator::new(config, collaborators, encoder)
}

/// Recompute SRT text from a persisted `script.json` and its audio folder.
///
/// Uses the same alignment and timing as a pipeline run, so the result
/// matches the `subtitles.srt` the job wrote. With `images_dir`, clips past
/// the number of images are left out, as they are when the video is
/// assembled.
///
/// # Errors
///
/// Returns a `StorageError` if the script cannot be read, a `JsonError` if
/// it does not parse, and any probing or timing error.
#[instrument(skip_all, fields(script = %script_path.display(), audio = %audio_dir.display()))]
pub async fn render_subtitles(
    script_path: &Path,
    audio_dir: &Path,
    images_dir: Option<&Path>,
    prober: &dyn DurationProber,
    timing: &TimingConfig,
) -> FrescoResult<String> {
    let raw = tokio::fs::read_to_string(script_path)
        .await
        .map_err(|e| StorageError::read(script_path, e))?;
    let script: Script = serde_json::from_str(&raw).map_err(|e| {
        JsonError::new(format!("invalid script {}: {}", script_path.display(), e))
    })?;

    let clips = match images_dir {
        Some(dir) => {
            let images = list(SegmentKind::Image, dir).await?.len();
            (images > 0).then_some(images)
        }
        None => None,
    };
    let (narration, cues) = narration_cues(&script, audio_dir, clips, prober, timing).await?;
    info!(clips = narration.audio.len(), cues = cues.len(), "Subtitles computed");
    Ok(render_srt(&cues))
}
