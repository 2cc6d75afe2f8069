//! Credential profiles for provider access.
//!
//! A [`CredentialProfile`] bundles a provider selection with its endpoint
//! and credentials; the [`ProfileStore`] keeps a named set of them with one
//! active at a time. Secrets are wrapped in [`ApiKey`] so they can never be
//! logged by accident.
//!
//! # Example
//!
//! ```ignore
//! use easel_models::auth::{CredentialProfile, ProfileStore};
//! use easel_models::ProviderKind;
//!
//! let mut store = ProfileStore::with_default();
//! store.create(ProviderKind::HuggingFace);
//! let report = store.active().unwrap().validate(&reqwest::Client::new()).await;
//! ```

mod store;
mod validation;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

pub use store::{DEFAULT_PROFILE_NAME, ProfileSeed, ProfileStore, load_profiles};
pub use validation::ProfileValidationResult;

use crate::types::ProviderKind;

/// A secret credential value that prevents accidental logging.
///
/// Wraps `SecretString`, which implements `Debug` as `"[REDACTED]"`,
/// zeroizes memory on drop, and requires explicit `.expose_secret()`.
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Create a new key from a string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// Expose the secret value.
    ///
    /// Use sparingly - only when actually building a request header.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    /// Whether the wrapped value is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey([REDACTED])")
    }
}

impl Default for ApiKey {
    fn default() -> Self {
        Self::new("")
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// How a free-tier (Pollinations) profile authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Anonymous access, no credentials sent.
    #[default]
    Free,
    /// Domain-registered access via a `Referer` header.
    Referrer,
    /// Token access via an `Authorization: Bearer` header.
    Token,
}

/// A named bundle of provider selection plus credentials.
#[derive(Debug, Clone)]
pub struct CredentialProfile {
    /// Unique profile name within the store.
    pub name: String,
    /// Which backend this profile talks to.
    pub provider: ProviderKind,
    /// API endpoint base URL.
    pub base_url: String,
    /// API key, for key-authenticated providers.
    pub api_key: ApiKey,
    /// Free-tier auth mode (meaningful for Pollinations only).
    pub auth_mode: AuthMode,
    /// Registered referrer domain for [`AuthMode::Referrer`].
    pub referrer: String,
    /// Access token for [`AuthMode::Token`].
    pub token: ApiKey,
    /// Whether the last credential check passed.
    pub validated: bool,
}

impl CredentialProfile {
    /// Create a profile with the defaults for a provider kind.
    ///
    /// Starts unvalidated except for the free tier, which needs no
    /// credentials.
    pub fn defaults(name: impl Into<String>, provider: ProviderKind) -> Self {
        Self {
            name: name.into(),
            provider,
            base_url: provider.default_base_url().to_string(),
            api_key: ApiKey::default(),
            auth_mode: AuthMode::Free,
            referrer: String::new(),
            token: ApiKey::default(),
            validated: provider == ProviderKind::Pollinations,
        }
    }

    /// Switch this profile to another provider kind, resetting endpoint and
    /// credentials to that kind's defaults.
    ///
    /// Selecting a new provider deliberately discards the previous
    /// credentials rather than carrying them across vendors.
    pub fn reset_provider(&mut self, provider: ProviderKind) {
        let name = std::mem::take(&mut self.name);
        *self = Self::defaults(name, provider);
    }
}
