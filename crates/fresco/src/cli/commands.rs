//! CLI command definitions.

use clap::{Parser, Subcommand};
use fresco::{FrescoConfig, FrescoResult};
use std::path::PathBuf;

/// Fresco - turn a topic into a narrated, illustrated, subtitled video
#[derive(Parser, Debug)]
#[command(name = "fresco")]
#[command(about = "Turn a topic into a narrated, illustrated, subtitled video", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true, env = "FRESCO_JSON_LOGS")]
    pub json_logs: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(short, long, global = true, env = "FRESCO_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Load configuration from `--config`, or the standard search path.
    pub fn load_config(&self) -> FrescoResult<FrescoConfig> {
        match &self.config {
            Some(path) => FrescoConfig::from_file(path),
            None => FrescoConfig::load(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one video and wait for it to publish
    Run {
        /// Video topic
        topic: String,

        /// Requested duration in seconds (10-300)
        #[arg(short, long, default_value_t = 60)]
        duration: u32,

        /// Point the script should cover (repeatable)
        #[arg(short, long = "key-point")]
        key_points: Vec<String>,

        /// Presentation style
        #[arg(short, long, default_value = "educational")]
        style: String,

        /// Give up waiting after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Serve the HTTP submission API
    Serve {
        /// Bind address, overriding `server.host`
        #[arg(long)]
        host: Option<String>,

        /// Bind port, overriding `server.port`
        #[arg(long)]
        port: Option<u16>,
    },

    /// List published videos
    List {
        /// Print JSON instead of one name per line
        #[arg(long)]
        json: bool,
    },

    /// Recompute subtitles from a persisted script and its audio clips
    Subtitles {
        /// Path to the job's script.json
        #[arg(long)]
        script: PathBuf,

        /// Folder of segment_<n> audio clips
        #[arg(long)]
        audio: PathBuf,

        /// Folder of scene_<n> images; clips without an image are left out
        #[arg(long)]
        images: Option<PathBuf>,

        /// Write the SRT here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum words per cue, overriding `timing.chunk_size`
        #[arg(long)]
        chunk_size: Option<usize>,
    },
}
