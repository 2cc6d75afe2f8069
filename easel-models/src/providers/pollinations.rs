//! Pollinations.ai free-tier provider.
//!
//! One `GET /prompt/{prompt}` per image; no account required in free mode,
//! with optional referrer- or token-based authentication. Model discovery
//! reads `GET /models`, which returns a bare JSON array of model names.

use async_trait::async_trait;
use secrecy::ExposeSecret as _;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{ApiKey, AuthMode, CredentialProfile};
use crate::types::{ModelDescriptor, ProviderKind};
use crate::{Error, Result};

use super::{
    Discovery, GenerationRequest, ImageProvider, DISCOVERY_TIMEOUT, REQUEST_TIMEOUT,
};

/// Icon applied to models discovered from the Pollinations endpoint.
const DISCOVERED_ICON: &str = "🌸";

/// Free-tier HTTP image provider.
pub struct PollinationsProvider {
    base_url: String,
    auth_mode: AuthMode,
    token: ApiKey,
    referrer: String,
    client: reqwest::Client,
}

impl PollinationsProvider {
    /// Build an adapter from a profile's endpoint and auth fields.
    pub fn from_profile(profile: &CredentialProfile) -> Self {
        Self {
            base_url: profile.base_url.clone(),
            auth_mode: profile.auth_mode,
            token: profile.token.clone(),
            referrer: profile.referrer.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// Build the per-unit request URL: the prompt travels percent-encoded
    /// in the path, everything else as query parameters.
    fn build_url(&self, request: &GenerationRequest, seed: u64) -> Result<Url> {
        let mut prompt = request.styled_prompt();
        if let Some(negative) = request.negative_prompt.as_deref()
            && !negative.is_empty()
        {
            // The free tier has no separate negative-prompt field.
            prompt.push_str(&format!(" --no {negative}"));
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::Transport(format!("bad base url '{}': {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Transport(format!("base url '{}' cannot take a path", self.base_url)))?
            .push("prompt")
            .push(&prompt);

        let options = &request.options;
        url.query_pairs_mut()
            .append_pair("model", &request.model)
            .append_pair("width", &request.size.width.to_string())
            .append_pair("height", &request.size.height.to_string())
            .append_pair("seed", &seed.to_string())
            .append_pair("nologo", &options.nologo.to_string())
            .append_pair("private", &options.private.to_string())
            .append_pair("enhance", &options.enhance.to_string())
            .append_pair("safe", &options.safe.to_string());

        Ok(url)
    }

    /// Attach the header matching the configured auth mode, if any.
    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth_mode {
            AuthMode::Token if !self.token.is_empty() => {
                builder.bearer_auth(self.token.expose_secret())
            }
            AuthMode::Referrer if !self.referrer.is_empty() => {
                builder.header(reqwest::header::REFERER, &self.referrer)
            }
            _ => builder,
        }
    }
}

#[async_trait]
impl ImageProvider for PollinationsProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Pollinations
    }

    async fn discover_models(&self) -> Discovery {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(DISCOVERY_TIMEOUT)
            .send()
            .await;

        let response = match response {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                let warning =
                    format!("model discovery returned HTTP {}", r.status().as_u16());
                warn!(%url, %warning, "discovery degraded");
                return Discovery::degraded(warning);
            }
            Err(e) => {
                let warning = format!("model discovery failed: {e}");
                warn!(%url, %warning, "discovery degraded");
                return Discovery::degraded(warning);
            }
        };

        let names: Vec<String> = match response.json().await {
            Ok(names) => names,
            Err(e) => {
                let warning = format!("model list was not a JSON array of names: {e}");
                warn!(%url, %warning, "discovery degraded");
                return Discovery::degraded(warning);
            }
        };

        let mut discovery = Discovery::default();
        for name in names {
            let descriptor = ModelDescriptor::discovered(&name, DISCOVERED_ICON);
            discovery.models.insert(name, descriptor);
        }
        debug!(count = discovery.models.len(), "discovered pollinations models");
        discovery
    }

    async fn generate_one(&self, request: &GenerationRequest, seed: u64) -> Result<Vec<u8>> {
        let url = self.build_url(request, seed)?;
        let response = self
            .apply_auth(self.client.get(url))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Provider {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::GenerationOptions;

    fn provider() -> PollinationsProvider {
        let profile = CredentialProfile::defaults("p", ProviderKind::Pollinations);
        PollinationsProvider::from_profile(&profile)
    }

    #[test]
    fn url_carries_prompt_in_path_and_params_in_query() {
        let mut request = GenerationRequest::new("flux-dev", "a red fox in snow");
        request.size = "512x768".parse().unwrap();
        request.options = GenerationOptions::default();

        let url = provider().build_url(&request, 42).unwrap();
        assert_eq!(
            url.path(),
            "/prompt/a%20red%20fox%20in%20snow"
        );

        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("model".into(), "flux-dev".into())));
        assert!(query.contains(&("width".into(), "512".into())));
        assert!(query.contains(&("height".into(), "768".into())));
        assert!(query.contains(&("seed".into(), "42".into())));
        assert!(query.contains(&("nologo".into(), "true".into())));
        assert!(query.contains(&("safe".into(), "false".into())));
    }

    #[test]
    fn negative_prompt_folds_into_the_path() {
        let mut request = GenerationRequest::new("flux-dev", "a red fox");
        request.negative_prompt = Some("blurry, low quality".to_string());

        let url = provider().build_url(&request, 1).unwrap();
        assert!(url.path().contains("--no%20blurry"));
    }

    #[test]
    fn style_suffix_expands_before_encoding() {
        let mut request = GenerationRequest::new("flux-dev", "a red fox");
        request.style = Some("pixel art".to_string());

        let url = provider().build_url(&request, 1).unwrap();
        assert!(url.path().contains("a%20red%20fox,%20pixel%20art"));
    }

    #[tokio::test]
    async fn discovery_degrades_on_unreachable_endpoint() {
        let mut profile = CredentialProfile::defaults("p", ProviderKind::Pollinations);
        profile.base_url = "http://127.0.0.1:1".to_string();
        let provider = PollinationsProvider::from_profile(&profile);

        let discovery = provider.discover_models().await;
        assert!(discovery.models.is_empty());
        assert!(discovery.warning.is_some());
    }
}
