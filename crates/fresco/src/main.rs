//! Fresco CLI binary.
//!
//! - Generate a video and wait for it
//! - Serve the HTTP submission API
//! - List published videos
//! - Recompute subtitles for a finished job's workspace

use clap::Parser;
use fresco::{ObservabilityConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, list_videos, run_job, serve_api, write_subtitles};

    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::new().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability(&observability)?;

    let config = cli.load_config()?;

    match cli.command {
        Commands::Run {
            topic,
            duration,
            key_points,
            style,
            timeout,
        } => {
            run_job(config, topic, duration, key_points, style, timeout).await?;
        }

        Commands::Serve { host, port } => {
            serve_api(config, host, port).await?;
        }

        Commands::List { json } => {
            list_videos(&config, json).await?;
        }

        Commands::Subtitles {
            script,
            audio,
            images,
            output,
            chunk_size,
        } => {
            write_subtitles(
                &config,
                &script,
                &audio,
                images.as_deref(),
                output.as_deref(),
                chunk_size,
            )
            .await?;
        }
    }

    Ok(())
}
