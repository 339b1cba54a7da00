//! Single-job state machine.

use crate::{
    AlignedNarration, CallPacer, Collaborators, Job, align_narration, resolve_media,
    sniff_image_extension, timed_cues,
};
use fresco_core::{FrescoConfig, Script, Stage, SubtitleCue};
use fresco_error::{
    FrescoError, FrescoResult, GenerationError, GenerationErrorKind, HttpError, PipelineError,
};
use fresco_media::{
    Assembler, AssemblyInputs, CachingProber, DefaultProber, DurationProber, Encoder,
    paired_count, render_srt,
};
use fresco_storage::{JobWorkspace, Publisher, SegmentKind, list};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Wrap whatever stopped `stage` as the job's failure.
fn halt(stage: Stage) -> impl Fn(FrescoError) -> FrescoError {
    move |e| PipelineError::new(stage.to_string(), e.to_string()).into()
}

/// Drives one job from cleaning to publishing.
///
/// Stages run strictly in order; the first failure halts the job and is
/// reported as a `PipelineError` naming the stage. Image and audio stages
/// skip individual failed items and fail only when nothing was produced.
pub struct Orchestrator {
    config: FrescoConfig,
    collaborators: Collaborators,
    assembler: Assembler,
    publisher: Publisher,
    prober: Arc<dyn DurationProber>,
    http: reqwest::Client,
}

impl Orchestrator {
    /// Orchestrator over `config` using the given backends and encoder.
    ///
    /// # Errors
    ///
    /// Returns an `HttpError` if the HTTP client for image URLs cannot be
    /// built.
    pub fn new(
        config: FrescoConfig,
        collaborators: Collaborators,
        encoder: Arc<dyn Encoder>,
    ) -> FrescoResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.providers.request_timeout_secs))
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            assembler: Assembler::new(&config, encoder),
            publisher: Publisher::new(config.paths.publish_dir.clone()),
            prober: Arc::new(DefaultProber::default()),
            collaborators,
            config,
            http,
        })
    }

    /// Replace the duration prober (each job still caches on top of it).
    pub fn with_prober(mut self, prober: Arc<dyn DurationProber>) -> Self {
        self.prober = prober;
        self
    }

    /// Configuration this orchestrator runs with.
    pub fn config(&self) -> &FrescoConfig {
        &self.config
    }

    /// Where finished videos go.
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    /// Scratch workspace of `job`.
    pub fn workspace(&self, job: &Job) -> JobWorkspace {
        JobWorkspace::new(self.config.job_scratch_dir(&job.id))
    }

    /// Run `job` to completion, calling `on_stage` as each stage begins.
    ///
    /// The job's scratch workspace is removed afterwards, success or
    /// failure, unless `keep_workspace` is set.
    ///
    /// # Errors
    ///
    /// Returns a `PipelineError` carrying the failing stage and its cause.
    #[instrument(skip_all, fields(job_id = %job.id, topic = %job.request.topic))]
    pub async fn run(
        &self,
        job: &Job,
        on_stage: &(dyn Fn(Stage) + Send + Sync),
    ) -> FrescoResult<PathBuf> {
        let workspace = self.workspace(job);
        let result = self.execute(job, &workspace, on_stage).await;

        if self.config.keep_workspace {
            debug!(root = %workspace.root().display(), "Keeping workspace");
        } else if let Err(e) = workspace.remove().await {
            warn!(error = %e, "Failed to remove workspace");
        }

        match &result {
            Ok(path) => info!(published = %path.display(), "Job succeeded"),
            Err(e) => warn!(error = %e, "Job failed"),
        }
        result
    }

    async fn execute(
        &self,
        job: &Job,
        workspace: &JobWorkspace,
        on_stage: &(dyn Fn(Stage) + Send + Sync),
    ) -> FrescoResult<PathBuf> {
        let enter = |stage: Stage| {
            info!(%stage, "Entering stage");
            on_stage(stage);
        };
        // One cache per job: timing and assembly never decode a clip twice
        let prober = CachingProber::new(Arc::clone(&self.prober));

        enter(Stage::Cleaning);
        workspace.clean().await.map_err(halt(Stage::Cleaning))?;

        enter(Stage::Scripting);
        self.script(job, workspace)
            .await
            .map_err(halt(Stage::Scripting))?;

        enter(Stage::Imaging);
        let script = workspace.load_script().await.map_err(halt(Stage::Imaging))?;
        self.images(&script, workspace)
            .await
            .map_err(halt(Stage::Imaging))?;

        enter(Stage::Narrating);
        self.narration(&script, workspace)
            .await
            .map_err(halt(Stage::Narrating))?;

        enter(Stage::Timing);
        let (visuals, narration, cues) = self
            .timing(&script, workspace, &prober)
            .await
            .map_err(halt(Stage::Timing))?;

        enter(Stage::Assembling);
        let rendered = self
            .assemble(job, &script, visuals, narration, cues, workspace, &prober)
            .await
            .map_err(halt(Stage::Assembling))?;

        enter(Stage::Publishing);
        let published = self
            .publisher
            .publish(&rendered, &job.filename)
            .await
            .map_err(halt(Stage::Publishing))?;

        enter(Stage::Done);
        Ok(published)
    }

    async fn script(&self, job: &Job, workspace: &JobWorkspace) -> FrescoResult<()> {
        let request = &job.request;
        let script = self
            .collaborators
            .script
            .generate(&request.topic, request.duration, &request.key_points)
            .await?;
        script.validate()?;
        let path = workspace.persist_script(&script).await?;
        info!(
            narration = script.narration.len(),
            visuals = script.visuals.len(),
            path = %path.display(),
            provider = self.collaborators.script.provider_name(),
            "Script persisted"
        );
        Ok(())
    }

    async fn images(&self, script: &Script, workspace: &JobWorkspace) -> FrescoResult<()> {
        let pacer = CallPacer::new(self.config.imaging.inter_call_delay());
        let mut attempted = 0;
        let mut produced = 0;

        for (idx, cue) in script.visuals.iter().enumerate() {
            if cue.prompt.trim().is_empty() {
                debug!(idx, "Blank prompt, skipping visual cue");
                continue;
            }
            attempted += 1;
            pacer.ready().await;

            let source = match self.collaborators.image.generate(&cue.prompt).await {
                Ok(Some(source)) => source,
                Ok(None) => {
                    warn!(idx, "Image generator returned nothing, skipping");
                    continue;
                }
                Err(e) => {
                    warn!(idx, error = %e, "Image generation failed, skipping");
                    continue;
                }
            };
            let bytes = match resolve_media(&self.http, source).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(idx, error = %e, "Unusable image content, skipping");
                    continue;
                }
            };

            let name = format!(
                "scene_{}-{}.{}",
                idx,
                cue.file_label(idx),
                sniff_image_extension(&bytes)
            );
            let path = workspace.write_image(&name, &bytes).await?;
            debug!(idx, path = %path.display(), "Stored image");
            produced += 1;
        }

        if attempted > 0 && produced == 0 {
            return Err(GenerationError::new(GenerationErrorKind::NothingProduced {
                artifact: "images".into(),
                attempted,
            })
            .into());
        }
        info!(attempted, produced, "Imaging finished");
        Ok(())
    }

    async fn narration(&self, script: &Script, workspace: &JobWorkspace) -> FrescoResult<()> {
        let attempted = script.narration.len();
        let mut produced = 0;

        for (idx, segment) in script.narration.iter().enumerate() {
            let voice = self.config.voices.voice_for(&segment.speaker);
            let audio = match self
                .collaborators
                .speech
                .synthesize(&segment.text, voice, segment.speed)
                .await
            {
                Ok(audio) if !audio.is_empty() => audio,
                Ok(_) => {
                    warn!(idx, "Speech generator returned no audio, skipping");
                    continue;
                }
                Err(e) => {
                    warn!(idx, error = %e, "Speech synthesis failed, skipping");
                    continue;
                }
            };
            let path = workspace
                .write_audio(&format!("segment_{}.wav", idx), &audio)
                .await?;
            debug!(idx, voice, path = %path.display(), "Stored narration");
            produced += 1;
        }

        if produced == 0 {
            return Err(GenerationError::new(GenerationErrorKind::NothingProduced {
                artifact: "audio clips".into(),
                attempted,
            })
            .into());
        }
        info!(attempted, produced, "Narration finished");
        Ok(())
    }

    /// Pair images with narration, then time captions for the paired clips
    /// only, so the subtitles match what gets assembled.
    async fn timing(
        &self,
        script: &Script,
        workspace: &JobWorkspace,
        prober: &dyn DurationProber,
    ) -> FrescoResult<(Vec<PathBuf>, AlignedNarration, Vec<SubtitleCue>)> {
        let visuals = list(SegmentKind::Image, &workspace.images_dir()).await?;
        let mut narration = align_narration(script, &workspace.audio_dir()).await?;
        let paired = paired_count(visuals.len(), narration.len());
        if paired < narration.len() {
            warn!(
                images = visuals.len(),
                clips = narration.len(),
                "Fewer images than narration clips, dropping unpaired narration"
            );
            narration.truncate(paired);
        }

        let cues = timed_cues(&narration, prober, &self.config.timing).await?;
        let path = workspace.write_subtitles(&render_srt(&cues)).await?;
        info!(cues = cues.len(), path = %path.display(), "Subtitles written");
        Ok((visuals, narration, cues))
    }

    #[allow(clippy::too_many_arguments)]
    async fn assemble(
        &self,
        job: &Job,
        script: &Script,
        visuals: Vec<PathBuf>,
        narration: AlignedNarration,
        cues: Vec<SubtitleCue>,
        workspace: &JobWorkspace,
        prober: &dyn DurationProber,
    ) -> FrescoResult<PathBuf> {
        let title = if script.topic.trim().is_empty() {
            job.request.topic.clone()
        } else {
            script.topic.clone()
        };
        let inputs = AssemblyInputs {
            title,
            visuals,
            audio: narration.audio,
            captions: cues,
        };
        let output = workspace.output_dir().join(&job.filename);
        self.assembler.assemble(&inputs, prober, &output).await
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("collaborators", &self.collaborators)
            .field("publisher", &self.publisher)
            .finish_non_exhaustive()
    }
}
