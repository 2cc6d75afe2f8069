//! Hugging Face inference provider.
//!
//! Token-gated: one `POST /models/{model}` per image with a JSON body; the
//! response body is the raw image bytes. The hub is not enumerable as an
//! image-model list, so discovery yields the static catalog alone.

use async_trait::async_trait;
use secrecy::ExposeSecret as _;
use serde::Serialize;
use tracing::debug;

use crate::auth::{ApiKey, CredentialProfile};
use crate::types::ProviderKind;
use crate::{Error, Result};

use super::{Discovery, GenerationRequest, ImageProvider, REQUEST_TIMEOUT};

/// Fixed diffusion parameters for the inference API.
const NUM_INFERENCE_STEPS: u32 = 25;
const GUIDANCE_SCALE: f32 = 7.5;

/// Request body for `POST /models/{model}`.
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: String,
    parameters: InferenceParameters<'a>,
}

#[derive(Debug, Serialize)]
struct InferenceParameters<'a> {
    negative_prompt: &'a str,
    num_inference_steps: u32,
    guidance_scale: f32,
}

/// Token-gated HTTP image provider.
pub struct HuggingFaceProvider {
    base_url: String,
    api_key: ApiKey,
    client: reqwest::Client,
}

impl HuggingFaceProvider {
    /// Build an adapter from a profile's endpoint and token.
    pub fn from_profile(profile: &CredentialProfile) -> Self {
        Self {
            base_url: profile.base_url.clone(),
            api_key: profile.api_key.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ImageProvider for HuggingFaceProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::HuggingFace
    }

    async fn discover_models(&self) -> Discovery {
        // No enumerable image-model feed; the static catalog stands alone.
        Discovery::default()
    }

    async fn generate_one(&self, request: &GenerationRequest, _seed: u64) -> Result<Vec<u8>> {
        let body = InferenceRequest {
            inputs: request.styled_prompt(),
            parameters: InferenceParameters {
                negative_prompt: request.negative_prompt.as_deref().unwrap_or(""),
                num_inference_steps: NUM_INFERENCE_STEPS,
                guidance_scale: GUIDANCE_SCALE,
            },
        };

        let url = format!("{}/models/{}", self.base_url, request.model);
        debug!(%url, "requesting inference");
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
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

    #[test]
    fn request_body_matches_inference_api_shape() {
        let mut request = GenerationRequest::new("stable-diffusion-v1-5", "a paper crane");
        request.negative_prompt = Some("blurry".to_string());

        let body = InferenceRequest {
            inputs: request.styled_prompt(),
            parameters: InferenceParameters {
                negative_prompt: request.negative_prompt.as_deref().unwrap_or(""),
                num_inference_steps: NUM_INFERENCE_STEPS,
                guidance_scale: GUIDANCE_SCALE,
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["inputs"], "a paper crane");
        assert_eq!(json["parameters"]["negative_prompt"], "blurry");
        assert_eq!(json["parameters"]["num_inference_steps"], 25);
        assert_eq!(json["parameters"]["guidance_scale"], 7.5);
    }

    #[tokio::test]
    async fn discovery_is_empty_without_warning() {
        let profile = CredentialProfile::defaults("h", ProviderKind::HuggingFace);
        let provider = HuggingFaceProvider::from_profile(&profile);

        let discovery = provider.discover_models().await;
        assert!(discovery.models.is_empty());
        assert!(discovery.warning.is_none());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let mut profile = CredentialProfile::defaults("h", ProviderKind::HuggingFace);
        profile.base_url = "http://127.0.0.1:1".to_string();
        let provider = HuggingFaceProvider::from_profile(&profile);

        let request = GenerationRequest::new("stable-diffusion-v1-5", "a paper crane");
        let result = provider.generate_one(&request, 7).await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
