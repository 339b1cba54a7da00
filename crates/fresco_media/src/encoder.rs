//! Rendering seam between the timeline and a concrete encoder.

use crate::Timeline;
use async_trait::async_trait;
use fresco_error::FrescoResult;
use std::path::{Path, PathBuf};

/// Renders timelines and still frames to files.
///
/// Implementations must write `encode` output to a temporary sibling path
/// and rename it into place only on success, so no partial file ever sits
/// under the requested name.
#[async_trait]
pub trait Encoder: Send + Sync {
    /// Render a solid frame with `label` centered, at `output`.
    async fn render_placeholder(&self, label: &str, output: &Path) -> FrescoResult<PathBuf>;

    /// Encode `timeline` as one video at `output`.
    async fn encode(&self, timeline: &Timeline, output: &Path) -> FrescoResult<PathBuf>;
}
