//! Shared HTTP plumbing for every backend.

use fresco_core::ProvidersConfig;
use fresco_error::{ConfigError, FrescoResult, HttpError};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// A reqwest client bound to one endpoint, with optional bearer auth.
#[derive(Clone, derive_getters::Getters)]
pub struct ProviderClient {
    #[getter(skip)]
    client: Client,
    /// Endpoint every request is posted to
    url: String,
    #[getter(skip)]
    api_key: Option<String>,
}

impl ProviderClient {
    /// Client for `url` with an explicit key and timeout.
    ///
    /// # Errors
    ///
    /// Returns an `HttpError` if the underlying client cannot be built.
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> FrescoResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
            api_key,
        })
    }

    /// Client for the endpoint `pick` selects from `providers`.
    ///
    /// The bearer token is read from the environment variable named by
    /// `api_key_env`; an unset variable means no `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the endpoint is not configured.
    #[instrument(skip(providers, pick))]
    pub fn from_config(
        providers: &ProvidersConfig,
        name: &str,
        pick: impl Fn(&ProvidersConfig) -> Option<&String>,
    ) -> FrescoResult<Self> {
        let url = pick(providers)
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ConfigError::new(format!("providers.{}_url is not set", name)))?;

        let api_key = providers.api_key_env.as_deref().and_then(|var| {
            match std::env::var(var) {
                Ok(key) if !key.is_empty() => Some(key),
                _ => {
                    warn!(var, "API key variable not set, sending unauthenticated requests");
                    None
                }
            }
        });

        debug!(url = %url, authenticated = api_key.is_some(), "Provider endpoint configured");
        Self::new(
            url.clone(),
            api_key,
            Duration::from_secs(providers.request_timeout_secs),
        )
    }

    /// POST `body` as JSON and return the successful response.
    ///
    /// # Errors
    ///
    /// Returns an `HttpError` on transport failure or a non-2xx status, with
    /// the response body in the message.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> FrescoResult<reqwest::Response> {
        let mut request = self.client.post(&self.url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::new(format!("POST {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HttpError::new(format!(
                "POST {} returned {}: {}",
                self.url,
                status.as_u16(),
                body.trim()
            ))
            .into());
        }
        Ok(response)
    }
}

impl std::fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClient")
            .field("url", &self.url)
            .field("authenticated", &self.api_key.is_some())
            .finish()
    }
}
