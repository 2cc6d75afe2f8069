//! Session state: the active profile, its model registry, and the
//! bounded history and favorite stores.
//!
//! The registry is keyed to the active profile's provider. Any operation
//! that changes which provider is active rebuilds the registry, which
//! drops all previously discovered models. Discovery results never leak
//! across providers.

use tracing::{debug, warn};

use easel_models::auth::{
    CredentialProfile, ProfileStore, ProfileValidationResult, load_profiles,
};
use easel_models::providers::{ImageProvider, provider_for};
use easel_models::registry::ModelRegistry;
use easel_models::{Error, ProviderKind, Result};

use crate::history::{FavoriteStore, HistoryStore};

/// Everything a single interactive session owns.
pub struct SessionContext {
    profiles: ProfileStore,
    registry: ModelRegistry,
    pub history: HistoryStore,
    pub favorites: FavoriteStore,
    selected_model: Option<String>,
    client: reqwest::Client,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    /// A session seeded with the built-in default profile.
    pub fn new() -> Self {
        Self::with_profiles(ProfileStore::with_default())
    }

    /// A session over an existing profile store.
    pub fn with_profiles(profiles: ProfileStore) -> Self {
        let kind = profiles
            .active()
            .map(|p| p.provider)
            .unwrap_or(ProviderKind::Pollinations);
        Self {
            profiles,
            registry: ModelRegistry::new(kind),
            history: HistoryStore::new(),
            favorites: FavoriteStore::new(),
            selected_model: None,
            client: reqwest::Client::new(),
        }
    }

    /// A session seeded from a TOML profiles file. A missing file yields
    /// the default store.
    pub fn from_profiles_file(path: &std::path::Path) -> Result<Self> {
        Ok(Self::with_profiles(load_profiles(path)?))
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// The currently active profile.
    pub fn active_profile(&self) -> Option<&CredentialProfile> {
        self.profiles.active()
    }

    /// The currently selected model id, if one has been picked.
    pub fn selected_model(&self) -> Option<&str> {
        self.selected_model.as_deref()
    }

    /// Select a model; it must resolve in the current merged registry.
    pub fn select_model(&mut self, model_id: &str) -> Result<()> {
        if !self.registry.contains(model_id) {
            return Err(Error::ModelNotFound(model_id.to_string()));
        }
        self.selected_model = Some(model_id.to_string());
        Ok(())
    }

    /// Switch the active profile. Returns whether the active profile
    /// actually changed; on a change, discovered models and the model
    /// selection are dropped.
    pub fn switch_profile(&mut self, name: &str) -> Result<bool> {
        let changed = self.profiles.set_active(name)?;
        if changed {
            self.rebuild_registry();
        }
        Ok(changed)
    }

    /// Create and activate a fresh profile for a provider, returning its
    /// generated name.
    pub fn create_profile(&mut self, provider: ProviderKind) -> String {
        let name = self.profiles.create(provider);
        self.rebuild_registry();
        name
    }

    /// Delete a profile. If the deleted profile was active, the session
    /// falls back to the first remaining profile and its registry.
    pub fn delete_profile(&mut self, name: &str) -> Result<()> {
        let active_changed = self.profiles.delete(name)?;
        if active_changed {
            self.rebuild_registry();
        }
        Ok(())
    }

    /// Validate and persist a profile edit in one step.
    ///
    /// The credential check runs first; its verdict is stored on the
    /// profile either way, so a profile with bad credentials is saved but
    /// marked unvalidated. If the edit changes the active profile's
    /// provider, the registry is rebuilt.
    pub async fn save_profile(
        &mut self,
        name: &str,
        profile: CredentialProfile,
    ) -> Result<ProfileValidationResult> {
        let was_active = self.profiles.active_name() == name;
        let previous_provider = self
            .profiles
            .get(name)
            .ok_or_else(|| Error::ProfileNotFound(name.to_string()))?
            .provider;

        let verdict = profile.validate(&self.client).await;
        if !verdict.valid {
            warn!(profile = %profile.name, message = %verdict.message, "credential check failed");
        }

        let saved_name = profile.name.clone();
        let provider = profile.provider;
        self.profiles.update(name, profile)?;
        self.profiles.set_validated(&saved_name, verdict.valid)?;

        if was_active && provider != previous_provider {
            self.rebuild_registry();
        }
        Ok(verdict)
    }

    /// Run model discovery for the active profile and merge the results
    /// into the registry. Returns the degradation warning, if discovery
    /// fell back to the static catalog.
    pub async fn refresh_models(&mut self) -> Result<Option<String>> {
        let profile = self
            .profiles
            .active()
            .ok_or_else(|| Error::Configuration("no active profile".to_string()))?;
        let provider = provider_for(profile);
        Ok(self.refresh_models_with(provider.as_ref()).await)
    }

    /// Run model discovery with an explicit provider adapter.
    pub async fn refresh_models_with(&mut self, provider: &dyn ImageProvider) -> Option<String> {
        let discovery = provider.discover_models().await;
        let warning = discovery.warning.clone();
        debug!(
            provider = %self.registry.kind(),
            discovered = discovery.models.len(),
            "merging discovery results"
        );
        self.registry.set_discovered(discovery);
        warning
    }

    fn rebuild_registry(&mut self) {
        let kind = self
            .profiles
            .active()
            .map(|p| p.provider)
            .unwrap_or(ProviderKind::Pollinations);
        debug!(provider = %kind, "rebuilding registry, discovered models dropped");
        self.registry = ModelRegistry::new(kind);
        self.selected_model = None;
    }
}
