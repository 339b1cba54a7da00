//! `ffmpeg`-backed encoder.

use crate::{Clip, Encoder, Timeline};
use async_trait::async_trait;
use fresco_core::VideoConfig;
use fresco_error::{AssemblyError, AssemblyErrorKind, FrescoResult};
use std::ffi::OsString;
use std::fmt::Write;
use std::path::{Path, PathBuf};

const AUDIO_RATE: u32 = 44_100;
const TITLE_FONT_SIZE: u32 = 50;
const CAPTION_FONT_SIZE: u32 = 40;
const CAPTION_MARGIN: u32 = 60;
/// Lines of ffmpeg stderr kept in an encode error.
const STDERR_TAIL: usize = 12;

/// Escape text for a single-quoted `drawtext` value.
///
/// Single quotes cannot be escaped inside a quoted filter value, so they
/// become typographic apostrophes.
fn escape_drawtext(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push('\u{2019}'),
            ':' => out.push_str("\\:"),
            '%' => out.push_str("\\%"),
            '\n' | '\r' => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// Temporary sibling of `output` that keeps its extension, so ffmpeg still
/// picks the right container.
fn partial_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output.with_file_name(format!(".partial.{}", name))
}

fn secs(value: f64) -> String {
    format!("{:.3}", value)
}

/// Drives the `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: PathBuf,
    video: VideoConfig,
    font: Option<PathBuf>,
}

impl FfmpegEncoder {
    /// Encoder with the given output settings and optional TrueType font.
    pub fn new(video: VideoConfig, font: Option<PathBuf>) -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            video,
            font,
        }
    }

    /// Run `program` instead of `ffmpeg` from `PATH`.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    fn size(&self) -> String {
        format!("{}x{}", self.video.width, self.video.height)
    }

    fn drawtext(&self, text: &str, size: u32, placement: &str) -> String {
        let mut filter = format!(
            "drawtext=text='{}':fontcolor=white:fontsize={}:{}",
            escape_drawtext(text),
            size,
            placement
        );
        if let Some(font) = &self.font {
            let _ = write!(filter, ":fontfile='{}'", escape_drawtext(&font.to_string_lossy()));
        }
        filter
    }

    /// The `-filter_complex` graph for `timeline`.
    ///
    /// Clip `k` reads video from input `2k` and audio from input `2k + 1`.
    /// Every clip is scaled and padded to the output size, audio is padded
    /// and trimmed to the clip length, then everything is concatenated and
    /// captions are drawn over the result.
    pub fn filter_graph(&self, timeline: &Timeline) -> String {
        let (w, h, fps) = (self.video.width, self.video.height, self.video.fps);
        let mut graph = String::new();

        for (k, clip) in timeline.clips().iter().enumerate() {
            let mut video = format!(
                "[{}:v]scale={w}:{h}:force_original_aspect_ratio=decrease,pad={w}:{h}:(ow-iw)/2:(oh-ih)/2,setsar=1,fps={fps},format=yuv420p",
                2 * k
            );
            match clip {
                Clip::Card(card) => {
                    video.push(',');
                    video.push_str(&self.drawtext(
                        &card.text,
                        TITLE_FONT_SIZE,
                        "borderw=2:bordercolor=black:x=(w-text_w)/2:y=(h-text_h)/2",
                    ));
                }
                Clip::Segment {
                    input,
                    fade_in,
                    fade_out,
                } => {
                    if *fade_in > 0.0 {
                        let _ = write!(video, ",fade=t=in:st=0:d={}", secs(*fade_in));
                    }
                    if *fade_out > 0.0 {
                        let _ = write!(
                            video,
                            ",fade=t=out:st={}:d={}",
                            secs(input.duration - fade_out),
                            secs(*fade_out)
                        );
                    }
                }
            }
            let _ = write!(graph, "{}[v{}];", video, k);
            let _ = write!(
                graph,
                "[{}:a]aresample={AUDIO_RATE},aformat=sample_fmts=fltp:channel_layouts=stereo,apad,atrim=0:{},asetpts=PTS-STARTPTS[a{}];",
                2 * k + 1,
                secs(clip.duration()),
                k
            );
        }

        for k in 0..timeline.clips().len() {
            let _ = write!(graph, "[v{}][a{}]", k, k);
        }
        let _ = write!(
            graph,
            "concat=n={}:v=1:a=1[vcat][aout];",
            timeline.clips().len()
        );

        // Blank cues still time the SRT but draw nothing
        let placement = format!(
            "box=1:boxcolor=black@0.8:boxborderw=10:x=(w-text_w)/2:y=h-text_h-{}",
            CAPTION_MARGIN
        );
        let overlays: Vec<String> = timeline
            .captions()
            .iter()
            .filter(|cue| !cue.text().trim().is_empty())
            .map(|cue| {
                format!(
                    "{}:enable='gte(t,{})*lt(t,{})'",
                    self.drawtext(cue.text(), CAPTION_FONT_SIZE, &placement),
                    secs(*cue.start()),
                    secs(*cue.end())
                )
            })
            .collect();
        if overlays.is_empty() {
            graph.push_str("[vcat]null[vout]");
        } else {
            let _ = write!(graph, "[vcat]{}[vout]", overlays.join(","));
        }
        graph
    }

    /// Full argument list for encoding `timeline` into `output`.
    pub fn encode_args(&self, timeline: &Timeline, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-y".into(), "-hide_banner".into()];
        let fps = self.video.fps.to_string();

        for clip in timeline.clips() {
            let duration = secs(clip.duration());
            match clip {
                Clip::Card(card) => {
                    match &card.background {
                        Some(image) => {
                            args.extend(
                                ["-loop", "1", "-framerate", fps.as_str(), "-t", duration.as_str(), "-i"]
                                    .map(OsString::from),
                            );
                            args.push(image.as_os_str().to_owned());
                        }
                        None => {
                            args.extend(["-f", "lavfi", "-t", duration.as_str(), "-i"].map(OsString::from));
                            args.push(format!("color=c=black:s={}:r={}", self.size(), fps).into());
                        }
                    }
                    args.extend(["-f", "lavfi", "-t", duration.as_str(), "-i"].map(OsString::from));
                    args.push(format!("anullsrc=r={}:cl=stereo", AUDIO_RATE).into());
                }
                Clip::Segment { input, .. } => {
                    args.extend(
                        ["-loop", "1", "-framerate", fps.as_str(), "-t", duration.as_str(), "-i"]
                            .map(OsString::from),
                    );
                    args.push(input.image.as_os_str().to_owned());
                    args.push("-i".into());
                    args.push(input.audio.as_os_str().to_owned());
                }
            }
        }

        args.push("-filter_complex".into());
        args.push(self.filter_graph(timeline).into());
        args.extend(
            [
                "-map", "[vout]", "-map", "[aout]", "-c:v", "libx264", "-preset", "fast", "-crf",
                "18", "-c:a", "aac", "-b:a", "192k", "-pix_fmt", "yuv420p", "-r", fps.as_str(),
                "-movflags", "+faststart",
            ]
            .map(OsString::from),
        );
        args.push(output.as_os_str().to_owned());
        args
    }

    async fn run(&self, args: Vec<OsString>) -> FrescoResult<()> {
        let output = tokio::process::Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                AssemblyError::new(AssemblyErrorKind::Encode(format!(
                    "failed to run {}: {}",
                    self.program.display(),
                    e
                )))
            })?;

        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        let lines: Vec<&str> = stderr.lines().collect();
        let tail = lines[lines.len().saturating_sub(STDERR_TAIL)..].join("\n");
        Err(AssemblyError::new(AssemblyErrorKind::Encode(format!(
            "{} exited with {}: {}",
            self.program.display(),
            output.status,
            tail
        )))
        .into())
    }

    async fn run_into(
        &self,
        args: Vec<OsString>,
        partial: &Path,
        output: &Path,
    ) -> FrescoResult<PathBuf> {
        if let Err(e) = self.run(args).await {
            let _ = tokio::fs::remove_file(partial).await;
            return Err(e);
        }
        tokio::fs::rename(partial, output).await.map_err(|e| {
            AssemblyError::new(AssemblyErrorKind::Output(format!(
                "rename {} to {}: {}",
                partial.display(),
                output.display(),
                e
            )))
        })?;
        Ok(output.to_path_buf())
    }
}

#[async_trait]
impl Encoder for FfmpegEncoder {
    #[tracing::instrument(skip(self, output), fields(output = %output.display()))]
    async fn render_placeholder(&self, label: &str, output: &Path) -> FrescoResult<PathBuf> {
        let partial = partial_path(output);
        let mut args: Vec<OsString> = ["-y", "-hide_banner", "-f", "lavfi", "-i"]
            .map(OsString::from)
            .to_vec();
        args.push(format!("color=c=black:s={}", self.size()).into());
        args.push("-vf".into());
        args.push(
            self.drawtext(label, TITLE_FONT_SIZE, "x=(w-text_w)/2:y=(h-text_h)/2")
                .into(),
        );
        args.extend(["-frames:v", "1", "-update", "1"].map(OsString::from));
        args.push(partial.as_os_str().to_owned());

        let path = self.run_into(args, &partial, output).await?;
        tracing::debug!("Rendered placeholder frame");
        Ok(path)
    }

    #[tracing::instrument(skip(self, timeline, output), fields(clips = timeline.clips().len(), output = %output.display()))]
    async fn encode(&self, timeline: &Timeline, output: &Path) -> FrescoResult<PathBuf> {
        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AssemblyError::new(AssemblyErrorKind::Output(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }
        let partial = partial_path(output);
        let args = self.encode_args(timeline, &partial);
        tracing::info!(
            duration = timeline.total_duration(),
            captions = timeline.captions().len(),
            "Encoding video"
        );
        self.run_into(args, &partial, output).await
    }
}
