//! Wire types for the provider endpoints.

use derive_getters::Getters;
use fresco_core::MediaSource;
use serde::{Deserialize, Serialize};

/// Body posted to the script endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptRequest {
    /// Video topic
    pub topic: String,
    /// Requested length in seconds
    pub duration: u32,
    /// Points the script should cover
    pub key_points: Vec<String>,
}

/// Body posted to the image endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Full prompt sent to the model
    pub prompt: String,
    /// Images requested; always 1
    pub n: u32,
    /// Requested size, e.g. "1024x1024"
    pub size: String,
}

/// One entry of an image response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageDatum {
    /// Hosted image location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    /// Inline base64 image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    b64_json: Option<String>,
}

/// Image endpoint reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageResponse {
    /// Generated images, first one is used
    #[serde(default)]
    data: Vec<ImageDatum>,
}

impl ImageResponse {
    /// The first usable image, preferring inline data over a URL.
    pub fn into_media(self) -> Option<MediaSource> {
        self.data.into_iter().find_map(|d| match (d.b64_json, d.url) {
            (Some(b64), _) if !b64.is_empty() => Some(MediaSource::Base64(b64)),
            (_, Some(url)) if !url.is_empty() => Some(MediaSource::Url(url)),
            _ => None,
        })
    }
}

/// Body posted to the speech endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// Text to speak
    pub input: String,
    /// Voice id
    pub voice: String,
    /// Rate multiplier
    pub speed: f32,
    /// Audio container requested
    pub response_format: String,
}
