//! OpenAI-compatible image provider.
//!
//! Serves both OpenAI-style endpoints and NavyAI, which speaks the same
//! protocol. Unlike the per-unit HTTP providers, this backend batches
//! natively: one `POST /images/generations` call carries `n` and returns
//! all images base64-encoded.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::ExposeSecret as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::{ApiKey, CredentialProfile};
use crate::types::{ModelDescriptor, ProviderKind};
use crate::{Error, Result};

use super::{
    Discovery, GeneratedImage, GenerationRequest, ImageProvider, DISCOVERY_TIMEOUT,
    REQUEST_TIMEOUT,
};

/// Only model ids containing one of these substrings are treated as image
/// models during discovery; compatible endpoints list chat models too.
const IMAGE_MODEL_KEYWORDS: [&str; 5] = ["flux", "stable", "dall", "midjourney", "sd"];

/// Request body for `POST /images/generations`.
#[derive(Debug, Serialize)]
struct ImagesRequest<'a> {
    model: &'a str,
    prompt: String,
    n: u32,
    size: String,
    response_format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<&'a str>,
}

/// Response body for `POST /images/generations`.
#[derive(Debug, Deserialize)]
struct ImagesResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    b64_json: String,
}

/// Response body for `GET /models`.
#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

/// Adapter for OpenAI-compatible images endpoints.
pub struct OpenAiCompatProvider {
    kind: ProviderKind,
    base_url: String,
    api_key: ApiKey,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Build an adapter from a profile's endpoint and key.
    ///
    /// The adapter keeps the profile's kind so NavyAI profiles stay
    /// distinguishable from generic compatible endpoints.
    pub fn from_profile(profile: &CredentialProfile) -> Self {
        Self {
            kind: profile.provider,
            base_url: profile.base_url.clone(),
            api_key: profile.api_key.clone(),
            client: reqwest::Client::new(),
        }
    }

    async fn request_images(
        &self,
        request: &GenerationRequest,
        n: u32,
    ) -> Result<Vec<Vec<u8>>> {
        let body = ImagesRequest {
            model: &request.model,
            prompt: request.styled_prompt(),
            n,
            size: request.size.to_string(),
            response_format: "b64_json",
            negative_prompt: request.negative_prompt.as_deref().filter(|s| !s.is_empty()),
        };

        let url = format!("{}/images/generations", self.base_url);
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

        let parsed: ImagesResponse = response
            .json()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        parsed
            .data
            .into_iter()
            .map(|image| {
                BASE64
                    .decode(image.b64_json)
                    .map_err(|e| Error::Provider {
                        status: 200,
                        message: format!("payload was not valid base64: {e}"),
                    })
            })
            .collect()
    }
}

#[async_trait]
impl ImageProvider for OpenAiCompatProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn discover_models(&self) -> Discovery {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.api_key.expose_secret())
            .timeout(DISCOVERY_TIMEOUT)
            .send()
            .await;

        let parsed: ModelsResponse = match response {
            Ok(r) if r.status().is_success() => match r.json().await {
                Ok(parsed) => parsed,
                Err(e) => {
                    let warning = format!("model list was not valid JSON: {e}");
                    warn!(%url, %warning, "discovery degraded");
                    return Discovery::degraded(warning);
                }
            },
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

        let mut discovery = Discovery::default();
        for entry in parsed.data {
            let id = entry.id.to_lowercase();
            if !IMAGE_MODEL_KEYWORDS.iter().any(|k| id.contains(k)) {
                continue;
            }
            let descriptor = ModelDescriptor::discovered(&entry.id, "🤖");
            discovery.models.insert(entry.id, descriptor);
        }
        debug!(count = discovery.models.len(), "discovered image models");
        discovery
    }

    async fn generate_one(&self, request: &GenerationRequest, _seed: u64) -> Result<Vec<u8>> {
        let mut images = self.request_images(request, 1).await?;
        images
            .pop()
            .ok_or_else(|| Error::Provider {
                status: 200,
                message: "provider returned an empty image list".to_string(),
            })
    }

    /// One call with `n` embedded; the endpoint batches natively.
    ///
    /// Seeds are not part of this wire format, but each returned image is
    /// still tagged with its drawn seed and batch index so outcomes stay
    /// uniform across adapters. A short batch marks the missing tail as
    /// failed units; a failed call fails every unit with the same reason.
    async fn generate_batch(
        &self,
        request: &GenerationRequest,
        seeds: &[u64],
    ) -> Vec<Result<GeneratedImage>> {
        let n = seeds.len() as u32;
        match self.request_images(request, n).await {
            Ok(images) => {
                let received = images.len();
                let mut results: Vec<Result<GeneratedImage>> = images
                    .into_iter()
                    .zip(seeds)
                    .enumerate()
                    .map(|(index, (bytes, &seed))| {
                        Ok(GeneratedImage {
                            bytes,
                            seed,
                            index: index as u32,
                        })
                    })
                    .collect();
                for index in received..seeds.len() {
                    warn!(unit = index, "provider returned fewer images than requested");
                    results.push(Err(Error::Provider {
                        status: 200,
                        message: format!("provider returned {received} of {n} images"),
                    }));
                }
                results
            }
            Err(e) => {
                warn!(error = %e, "batched generation call failed");
                let clone_err = || match &e {
                    Error::Transport(m) => Error::Transport(m.clone()),
                    Error::Provider { status, message } => Error::Provider {
                        status: *status,
                        message: message.clone(),
                    },
                    other => Error::Transport(other.to_string()),
                };
                seeds.iter().map(|_| Err(clone_err())).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_embeds_n_and_b64_format() {
        let mut request = GenerationRequest::new("dall-e-3", "a glass city");
        request.negative_prompt = Some("text, watermark".to_string());

        let body = ImagesRequest {
            model: &request.model,
            prompt: request.styled_prompt(),
            n: 3,
            size: request.size.to_string(),
            response_format: "b64_json",
            negative_prompt: request.negative_prompt.as_deref(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "dall-e-3");
        assert_eq!(json["n"], 3);
        assert_eq!(json["size"], "1024x1024");
        assert_eq!(json["response_format"], "b64_json");
        assert_eq!(json["negative_prompt"], "text, watermark");
    }

    #[test]
    fn empty_negative_prompt_is_omitted() {
        let body = ImagesRequest {
            model: "dall-e-2",
            prompt: "a glass city".to_string(),
            n: 1,
            size: "512x512".to_string(),
            response_format: "b64_json",
            negative_prompt: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("negative_prompt").is_none());
    }

    #[test]
    fn parse_images_response() {
        let json = r#"{"created": 1700000000, "data": [{"b64_json": "aGVsbG8="}]}"#;
        let parsed: ImagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(BASE64.decode(&parsed.data[0].b64_json).unwrap(), b"hello");
    }

    #[test]
    fn parse_models_response() {
        let json = r#"{"object": "list", "data": [{"id": "dall-e-3", "object": "model"}, {"id": "gpt-4o", "object": "model"}]}"#;
        let parsed: ModelsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.len(), 2);
        assert_eq!(parsed.data[0].id, "dall-e-3");
    }

    #[test]
    fn discovery_keywords_filter_chat_models() {
        let keep = |id: &str| {
            let id = id.to_lowercase();
            IMAGE_MODEL_KEYWORDS.iter().any(|k| id.contains(k))
        };
        assert!(keep("dall-e-3"));
        assert!(keep("FLUX-schnell"));
        assert!(keep("stable-diffusion-xl"));
        assert!(!keep("gpt-4o"));
        assert!(!keep("whisper-1"));
    }

    #[tokio::test]
    async fn batch_failure_fails_every_unit() {
        let mut profile = CredentialProfile::defaults("p", ProviderKind::Navy);
        profile.base_url = "http://127.0.0.1:1/v1".to_string();
        let provider = OpenAiCompatProvider::from_profile(&profile);

        let request = GenerationRequest::new("flux-pro", "a glass city");
        let results = provider.generate_batch(&request, &[7, 8, 9]).await;

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.is_err()));
    }
}
