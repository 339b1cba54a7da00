//! Speech synthesis over HTTP.

use crate::{ProviderClient, SpeechRequest};
use async_trait::async_trait;
use fresco_core::ProvidersConfig;
use fresco_error::{FrescoResult, GenerationError, GenerationErrorKind};
use fresco_interface::SpeechGenerator;
use tracing::{debug, instrument};

/// Posts narration text and returns the audio body as-is.
#[derive(Debug, Clone)]
pub struct HttpSpeechGenerator {
    client: ProviderClient,
    format: String,
}

impl HttpSpeechGenerator {
    /// Backend over an existing client, requesting WAV.
    pub fn new(client: ProviderClient) -> Self {
        Self {
            client,
            format: "wav".to_string(),
        }
    }

    /// Backend for `providers.speech_url`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the endpoint is not configured.
    pub fn from_config(providers: &ProvidersConfig) -> FrescoResult<Self> {
        ProviderClient::from_config(providers, "speech", |p| p.speech_url.as_ref()).map(Self::new)
    }
}

#[async_trait]
impl SpeechGenerator for HttpSpeechGenerator {
    #[instrument(skip(self, text), fields(url = %self.client.url(), chars = text.len()))]
    async fn synthesize(&self, text: &str, voice: &str, speed: f32) -> FrescoResult<Vec<u8>> {
        let body = SpeechRequest {
            input: text.to_string(),
            voice: voice.to_string(),
            speed,
            response_format: self.format.clone(),
        };
        let bytes = self
            .client
            .post_json(&body)
            .await?
            .bytes()
            .await
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Speech(format!(
                    "failed to read audio: {}",
                    e
                )))
            })?;

        debug!(bytes = bytes.len(), "Audio received");
        Ok(bytes.to_vec())
    }

    fn provider_name(&self) -> &'static str {
        "http"
    }
}
