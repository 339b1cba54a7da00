//! Subtitle recomputation command handler.

use fresco::{DefaultProber, FrescoConfig, FrescoResult, StorageError, render_subtitles};
use std::path::Path;
use tracing::info;

/// Handle the `subtitles` command.
pub async fn write_subtitles(
    config: &FrescoConfig,
    script: &Path,
    audio: &Path,
    images: Option<&Path>,
    output: Option<&Path>,
    chunk_size: Option<usize>,
) -> FrescoResult<()> {
    let mut timing = config.timing.clone();
    if let Some(size) = chunk_size {
        timing.chunk_size = size;
    }

    let srt = render_subtitles(script, audio, images, &DefaultProber::default(), &timing).await?;
    match output {
        Some(path) => {
            tokio::fs::write(path, srt)
                .await
                .map_err(|e| StorageError::write(path, e))?;
            info!(path = %path.display(), "Subtitles written");
        }
        None => print!("{}", srt),
    }
    Ok(())
}
