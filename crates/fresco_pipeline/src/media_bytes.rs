//! Normalizing generator output to bytes.

use base64::Engine;
use fresco_core::MediaSource;
use fresco_error::{FrescoResult, GenerationError, GenerationErrorKind, HttpError};

/// Guess an image file extension from magic bytes; unknown formats get `png`.
///
/// ```
/// use fresco_pipeline::sniff_image_extension;
///
/// assert_eq!(sniff_image_extension(&[0xFF, 0xD8, 0xFF, 0xE0]), "jpg");
/// assert_eq!(sniff_image_extension(b"RIFF\0\0\0\0WEBPVP8 "), "webp");
/// assert_eq!(sniff_image_extension(b"??"), "png");
/// ```
pub fn sniff_image_extension(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "jpg"
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "webp"
    } else {
        "png"
    }
}

/// Turn a [`MediaSource`] into raw bytes, fetching URLs with `client`.
///
/// Base64 text may carry a `data:<mime>;base64,` prefix.
///
/// # Errors
///
/// Returns an `HttpError` if a URL cannot be fetched and a
/// `GenerationError` if base64 does not decode or the content is empty.
pub async fn resolve_media(client: &reqwest::Client, source: MediaSource) -> FrescoResult<Vec<u8>> {
    let bytes = match source {
        MediaSource::Binary(bytes) => bytes,
        MediaSource::Base64(text) => {
            let payload = match text.split_once(";base64,") {
                Some((prefix, data)) if prefix.starts_with("data:") => data,
                _ => text.as_str(),
            };
            base64::engine::general_purpose::STANDARD
                .decode(payload.trim())
                .map_err(|e| {
                    GenerationError::new(GenerationErrorKind::Image(format!(
                        "invalid base64 image: {}",
                        e
                    )))
                })?
        }
        MediaSource::Url(url) => {
            tracing::debug!(%url, "Fetching generated image");
            let response = client
                .get(&url)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| HttpError::new(format!("GET {}: {}", url, e)))?;
            response
                .bytes()
                .await
                .map_err(|e| HttpError::new(format!("GET {}: {}", url, e)))?
                .to_vec()
        }
    };

    if bytes.is_empty() {
        return Err(GenerationError::new(GenerationErrorKind::Image("empty image content".into())).into());
    }
    Ok(bytes)
}
