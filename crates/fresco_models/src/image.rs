//! Image generation over HTTP.

use crate::{ImageRequest, ImageResponse, ProviderClient};
use async_trait::async_trait;
use fresco_core::{MediaSource, ProvidersConfig};
use fresco_error::{FrescoResult, GenerationError, GenerationErrorKind};
use fresco_interface::ImageGenerator;
use tracing::{debug, instrument};

const DEFAULT_SIZE: &str = "1024x1024";

/// Posts one prompt per call and returns the first image in the reply.
#[derive(Debug, Clone)]
pub struct HttpImageGenerator {
    client: ProviderClient,
    size: String,
}

impl HttpImageGenerator {
    /// Backend over an existing client, requesting square 1024px images.
    pub fn new(client: ProviderClient) -> Self {
        Self {
            client,
            size: DEFAULT_SIZE.to_string(),
        }
    }

    /// Backend for `providers.image_url`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the endpoint is not configured.
    pub fn from_config(providers: &ProvidersConfig) -> FrescoResult<Self> {
        ProviderClient::from_config(providers, "image", |p| p.image_url.as_ref()).map(Self::new)
    }

    /// Request a different image size.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    /// The prompt actually sent for a visual cue.
    pub fn enhance_prompt(prompt: &str) -> String {
        format!(
            "High quality realistic image: {}. Professional photography, detailed, clear focus.",
            prompt.trim()
        )
    }
}

#[async_trait]
impl ImageGenerator for HttpImageGenerator {
    #[instrument(skip(self, prompt), fields(url = %self.client.url()))]
    async fn generate(&self, prompt: &str) -> FrescoResult<Option<MediaSource>> {
        let body = ImageRequest {
            prompt: Self::enhance_prompt(prompt),
            n: 1,
            size: self.size.clone(),
        };
        let reply: ImageResponse = self
            .client
            .post_json(&body)
            .await?
            .json()
            .await
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Image(format!(
                    "unreadable image response: {}",
                    e
                )))
            })?;

        let media = reply.into_media();
        debug!(found = media.is_some(), "Image response parsed");
        Ok(media)
    }

    fn provider_name(&self) -> &'static str {
        "http"
    }
}
