//! Layered configuration.
//!
//! Configuration sources, later overriding earlier:
//! 1. Bundled defaults (`include_str!` of `fresco.toml`)
//! 2. `~/.config/fresco/fresco.toml`
//! 3. `./fresco.toml`
//! 4. `FRESCO__<SECTION>__<KEY>` environment variables
//!
//! The resulting [`FrescoConfig`] is passed by value into each component at
//! construction; nothing reads configuration globally.

use fresco_error::{ConfigError, FrescoError, FrescoResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../fresco.toml");

/// Filesystem locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root under which each job gets `<job id>/` scratch space
    pub scratch_root: PathBuf,
    /// Flat, publicly addressable output directory
    pub publish_dir: PathBuf,
    /// TrueType font for title cards and captions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<PathBuf>,
    /// Background image for intro and outro cards
    pub intro_image: PathBuf,
}

/// Subtitle timing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Maximum words per displayed cue
    pub chunk_size: usize,
    /// Seconds of intro card before narration starts
    pub intro_duration: f64,
    /// Seconds of outro card after narration ends
    pub outro_duration: f64,
}

/// Output video parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Frames per second
    pub fps: u32,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Fade-in and fade-out length per segment clip, in seconds
    pub fade: f64,
    /// Overlay subtitle cues on the video
    pub burn_captions: bool,
    /// Text of the outro credit card
    pub outro_text: String,
    /// Label drawn on the placeholder frame when no images exist
    pub placeholder_label: String,
}

/// Image stage parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagingConfig {
    /// Pause between image generator calls, in milliseconds
    pub inter_call_delay_ms: u64,
}

impl ImagingConfig {
    /// Inter-call delay as a `Duration`.
    pub fn inter_call_delay(&self) -> Duration {
        Duration::from_millis(self.inter_call_delay_ms)
    }
}

/// Speaker role to voice id mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoicesConfig {
    /// Voice id for male narrator roles
    pub male: String,
    /// Voice id for every other role
    pub female: String,
    /// Speaker roles that use the male voice
    pub male_roles: Vec<String>,
}

impl VoicesConfig {
    /// Voice id for a speaker role.
    pub fn voice_for(&self, speaker: &str) -> &str {
        if self.male_roles.iter().any(|r| r == speaker) {
            &self.male
        } else {
            &self.female
        }
    }
}

/// Submission server binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

/// HTTP endpoints of the external generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProvidersConfig {
    /// Script generator endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_url: Option<String>,
    /// Image generator endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Speech synthesis endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech_url: Option<String>,
    /// Environment variable holding the bearer token, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    120
}

/// Top-level Fresco configuration.
///
/// # Example
///
/// ```no_run
/// use fresco_core::FrescoConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FrescoConfig::load()?;
/// println!("chunk size: {}", config.timing.chunk_size);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrescoConfig {
    /// Filesystem locations
    pub paths: PathsConfig,
    /// Subtitle timing
    pub timing: TimingConfig,
    /// Output video
    pub video: VideoConfig,
    /// Image stage
    pub imaging: ImagingConfig,
    /// Voice mapping
    pub voices: VoicesConfig,
    /// Submission server
    pub server: ServerConfig,
    /// Generator endpoints
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Number of concurrent pipeline workers
    pub workers: usize,
    /// Keep each job's scratch directory after it finishes
    #[serde(default)]
    pub keep_workspace: bool,
}

impl FrescoConfig {
    /// The bundled defaults alone, without user overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file does not parse.
    pub fn bundled() -> FrescoResult<Self> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml)),
        )
    }

    /// Load configuration from a specific file layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> FrescoResult<Self> {
        debug!("Loading configuration from file");
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
                .add_source(config::File::from(path.as_ref())),
        )
    }

    /// Load configuration with precedence: env > current dir > home dir > bundled.
    ///
    /// User config files are optional and silently skipped if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source fails to parse or the merged
    /// values fail [`FrescoConfig::validate`].
    #[instrument]
    pub fn load() -> FrescoResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/fresco/fresco.toml");
            builder = builder.add_source(config::File::from(home_config).required(false));
        }

        builder = builder
            .add_source(config::File::with_name("fresco").required(false))
            .add_source(
                config::Environment::with_prefix("FRESCO")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> FrescoResult<Self> {
        let config: FrescoConfig = builder
            .build()
            .map_err(|e| {
                FrescoError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FrescoError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first bad field.
    pub fn validate(&self) -> FrescoResult<()> {
        let bad = |msg: String| -> FrescoResult<()> { Err(ConfigError::new(msg).into()) };

        if self.timing.chunk_size == 0 {
            return bad("timing.chunk_size must be at least 1".into());
        }
        for (name, value) in [
            ("timing.intro_duration", self.timing.intro_duration),
            ("timing.outro_duration", self.timing.outro_duration),
            ("video.fade", self.video.fade),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return bad(format!("{} must be a non-negative number, got {}", name, value));
            }
        }
        if self.video.fps == 0 {
            return bad("video.fps must be at least 1".into());
        }
        if self.video.width == 0 || self.video.height == 0 {
            return bad(format!(
                "video size {}x{} must be non-zero",
                self.video.width, self.video.height
            ));
        }
        if self.workers == 0 {
            return bad("workers must be at least 1".into());
        }
        Ok(())
    }

    /// Scratch directory for one job.
    pub fn job_scratch_dir(&self, job_id: &crate::JobId) -> PathBuf {
        self.paths.scratch_root.join(job_id.to_string())
    }
}
