//! Credential validation probes.
//!
//! Validation never fails across the boundary: every path returns a
//! [`ProfileValidationResult`] carrying a verdict and a human-readable
//! diagnostic, even when the probe itself errors out.

use std::time::Duration;

use secrecy::ExposeSecret as _;
use serde::Serialize;
use tracing::debug;

use crate::types::ProviderKind;

use super::CredentialProfile;

/// How long a validation probe may take before it counts as a failure.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a credential check: a verdict plus a diagnostic message.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileValidationResult {
    pub valid: bool,
    pub message: String,
}

impl ProfileValidationResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            valid: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

impl CredentialProfile {
    /// Check this profile's credentials against its provider.
    ///
    /// Free-tier profiles are always valid. Key- and token-authenticated
    /// profiles run a lightweight list-models probe and classify the
    /// result. Transport failures become a negative verdict, never an
    /// error.
    pub async fn validate(&self, client: &reqwest::Client) -> ProfileValidationResult {
        let result = match self.provider {
            ProviderKind::Pollinations => {
                ProfileValidationResult::ok("Pollinations.ai requires no validation")
            }
            ProviderKind::HuggingFace => self.probe_token_models(client).await,
            ProviderKind::Navy | ProviderKind::OpenAiCompat => {
                self.probe_key_models(client).await
            }
        };
        debug!(
            profile = %self.name,
            provider = %self.provider,
            valid = result.valid,
            "validated credentials"
        );
        result
    }

    /// Token-gated providers need a non-empty token that the models
    /// endpoint accepts.
    async fn probe_token_models(&self, client: &reqwest::Client) -> ProfileValidationResult {
        if self.api_key.is_empty() {
            return ProfileValidationResult::fail("Hugging Face requires an API token");
        }

        let url = format!("{}/models", self.base_url);
        let response = client
            .get(&url)
            .bearer_auth(self.api_key.expose_secret())
            .timeout(PROBE_TIMEOUT)
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => {
                ProfileValidationResult::ok("Hugging Face API token accepted")
            }
            Ok(r) => ProfileValidationResult::fail(format!(
                "Hugging Face rejected the token: HTTP {}",
                r.status().as_u16()
            )),
            Err(e) => ProfileValidationResult::fail(format!("validation probe failed: {e}")),
        }
    }

    /// Key-authenticated providers get a list-models capability probe.
    async fn probe_key_models(&self, client: &reqwest::Client) -> ProfileValidationResult {
        let url = format!("{}/models", self.base_url);
        let response = client
            .get(&url)
            .bearer_auth(self.api_key.expose_secret())
            .timeout(PROBE_TIMEOUT)
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => {
                ProfileValidationResult::ok("API key accepted")
            }
            Ok(r) => ProfileValidationResult::fail(format!(
                "API key rejected: HTTP {}",
                r.status().as_u16()
            )),
            Err(e) => ProfileValidationResult::fail(format!("validation probe failed: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ApiKey;

    #[tokio::test]
    async fn free_tier_is_always_valid() {
        let profile = CredentialProfile::defaults("p", ProviderKind::Pollinations);
        let result = profile.validate(&reqwest::Client::new()).await;
        assert!(result.valid);
        assert_eq!(result.message, "Pollinations.ai requires no validation");
    }

    #[tokio::test]
    async fn empty_token_fails_without_network() {
        let profile = CredentialProfile::defaults("h", ProviderKind::HuggingFace);
        let result = profile.validate(&reqwest::Client::new()).await;
        assert!(!result.valid);
        assert_eq!(result.message, "Hugging Face requires an API token");
    }

    #[tokio::test]
    async fn unreachable_endpoint_degrades_to_failed_verdict() {
        // Nothing listens on this port; the probe must classify the
        // transport failure instead of propagating an error.
        let mut profile = CredentialProfile::defaults("n", ProviderKind::Navy);
        profile.base_url = "http://127.0.0.1:1/v1".to_string();
        profile.api_key = ApiKey::new("sk-test");

        let result = profile.validate(&reqwest::Client::new()).await;
        assert!(!result.valid);
        assert!(result.message.contains("validation probe failed"));
    }
}
