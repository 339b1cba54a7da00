//! Command-line interface module.

mod commands;
mod library;
mod run;
mod serve;
mod subtitles;

pub use commands::{Cli, Commands};
pub use library::list_videos;
pub use run::run_job;
pub use serve::serve_api;
pub use subtitles::write_subtitles;
