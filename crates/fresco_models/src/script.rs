//! Script generation over HTTP.

use crate::{ProviderClient, ScriptRequest};
use async_trait::async_trait;
use fresco_core::{ProvidersConfig, Script};
use fresco_error::{FrescoResult, GenerationError, GenerationErrorKind};
use fresco_interface::ScriptGenerator;
use tracing::{debug, instrument};

/// Posts the topic and parses the reply as a [`Script`].
#[derive(Debug, Clone)]
pub struct HttpScriptGenerator {
    client: ProviderClient,
}

impl HttpScriptGenerator {
    /// Backend over an existing client.
    pub fn new(client: ProviderClient) -> Self {
        Self { client }
    }

    /// Backend for `providers.script_url`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the endpoint is not configured.
    pub fn from_config(providers: &ProvidersConfig) -> FrescoResult<Self> {
        ProviderClient::from_config(providers, "script", |p| p.script_url.as_ref()).map(Self::new)
    }
}

#[async_trait]
impl ScriptGenerator for HttpScriptGenerator {
    #[instrument(skip(self, key_points), fields(url = %self.client.url(), points = key_points.len()))]
    async fn generate(
        &self,
        topic: &str,
        duration: u32,
        key_points: &[String],
    ) -> FrescoResult<Script> {
        let body = ScriptRequest {
            topic: topic.to_string(),
            duration,
            key_points: key_points.to_vec(),
        };
        let response = self.client.post_json(&body).await?;
        let text = response.text().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::Script(format!(
                "failed to read response: {}",
                e
            )))
        })?;

        let mut script: Script = serde_json::from_str(&text).map_err(|e| {
            GenerationError::new(GenerationErrorKind::Script(format!(
                "response is not a script: {}",
                e
            )))
        })?;
        if script.topic.trim().is_empty() {
            script.topic = topic.to_string();
        }
        debug!(
            narration = script.narration.len(),
            visuals = script.visuals.len(),
            "Script received"
        );
        Ok(script)
    }

    fn provider_name(&self) -> &'static str {
        "http"
    }
}
