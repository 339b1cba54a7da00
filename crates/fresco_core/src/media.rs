//! Media source types returned by generators.

use serde::{Deserialize, Serialize};

/// Where generated media content lives.
///
/// Image backends answer with either a URL to fetch, base64 text, or raw
/// bytes; the pipeline normalizes all three to bytes before storing.
///
/// # Examples
///
/// ```
/// use fresco_core::MediaSource;
///
/// let url = MediaSource::Url("https://example.com/image.png".to_string());
/// let base64 = MediaSource::Base64("iVBORw0KGgo...".to_string());
/// let binary = MediaSource::Binary(vec![0x89, 0x50, 0x4E, 0x47]);
/// assert!(url.is_remote());
/// assert!(!base64.is_remote());
/// assert!(!binary.is_remote());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaSource {
    /// URL to fetch the content from
    Url(String),
    /// Base64-encoded content
    Base64(String),
    /// Raw binary data
    Binary(Vec<u8>),
}

impl MediaSource {
    /// Whether the content must be downloaded before use.
    pub fn is_remote(&self) -> bool {
        matches!(self, MediaSource::Url(_))
    }
}
