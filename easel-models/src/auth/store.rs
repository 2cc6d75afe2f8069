//! The profile store: named credential profiles with one active selection.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::types::ProviderKind;
use crate::{Error, Result};

use super::{ApiKey, AuthMode, CredentialProfile};

/// Name given to the profile installed when no seed file provides any.
pub const DEFAULT_PROFILE_NAME: &str = "Default Pollinations";

/// Base name for profiles created through [`ProfileStore::create`].
const NEW_PROFILE_NAME: &str = "New Profile";

/// Insertion-ordered set of credential profiles plus the active selection.
///
/// Invariant: whenever the store is non-empty, exactly one profile is
/// active. The last remaining profile cannot be deleted.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: Vec<CredentialProfile>,
    active: String,
}

impl ProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the default free-tier profile, pre-validated.
    pub fn with_default() -> Self {
        let mut store = Self::new();
        store.insert(CredentialProfile::defaults(
            DEFAULT_PROFILE_NAME,
            ProviderKind::Pollinations,
        ));
        store
    }

    /// Seed a store from TOML profile definitions, falling back to the
    /// default profile when the document defines none.
    pub fn from_toml_str(doc: &str) -> Result<Self> {
        let seeds: HashMap<String, ProfileSeed> =
            toml::from_str(doc).map_err(|e| Error::Configuration(e.to_string()))?;

        if seeds.is_empty() {
            return Ok(Self::with_default());
        }

        let mut store = Self::new();
        let mut names: Vec<_> = seeds.keys().cloned().collect();
        names.sort();
        for name in names {
            let seed = &seeds[&name];
            store.insert(seed.to_profile(name));
        }
        Ok(store)
    }

    /// All profiles, in insertion order.
    pub fn list(&self) -> &[CredentialProfile] {
        &self.profiles
    }

    /// Number of stored profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the store holds no profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// The active profile, if any exist.
    pub fn active(&self) -> Option<&CredentialProfile> {
        self.get(&self.active)
    }

    /// Name of the active profile.
    pub fn active_name(&self) -> &str {
        &self.active
    }

    /// Look up a profile by name.
    pub fn get(&self, name: &str) -> Option<&CredentialProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Make the named profile active.
    ///
    /// Returns `true` when the selection actually changed, so the caller
    /// can clear per-profile discovery state.
    pub fn set_active(&mut self, name: &str) -> Result<bool> {
        if self.get(name).is_none() {
            return Err(Error::ProfileNotFound(name.to_string()));
        }
        if self.active == name {
            return Ok(false);
        }
        debug!(previous = %self.active, next = %name, "switching active profile");
        self.active = name.to_string();
        Ok(true)
    }

    /// Create a new profile with provider-kind defaults and a unique name,
    /// make it active, and return its name.
    pub fn create(&mut self, provider: ProviderKind) -> String {
        let mut name = NEW_PROFILE_NAME.to_string();
        let mut counter = 1;
        while self.get(&name).is_some() {
            name = format!("{NEW_PROFILE_NAME} {counter}");
            counter += 1;
        }

        self.insert(CredentialProfile::defaults(&name, provider));
        self.active = name.clone();
        debug!(profile = %name, %provider, "created profile");
        name
    }

    /// Replace the named profile with an updated one.
    ///
    /// A differing `profile.name` renames the entry in place; the active
    /// selection follows the rename. The caller is expected to re-validate
    /// the profile (see [`CredentialProfile::validate`]) before or after
    /// storing it.
    pub fn update(&mut self, name: &str, profile: CredentialProfile) -> Result<()> {
        let Some(index) = self.profiles.iter().position(|p| p.name == name) else {
            return Err(Error::ProfileNotFound(name.to_string()));
        };
        if profile.name != name && self.get(&profile.name).is_some() {
            return Err(Error::Validation(format!(
                "a profile named '{}' already exists",
                profile.name
            )));
        }

        if self.active == name {
            self.active = profile.name.clone();
        }
        debug!(profile = %profile.name, validated = profile.validated, "updated profile");
        self.profiles[index] = profile;
        Ok(())
    }

    /// Record the outcome of a credential check on the named profile.
    pub fn set_validated(&mut self, name: &str, validated: bool) -> Result<()> {
        let Some(profile) = self.profiles.iter_mut().find(|p| p.name == name) else {
            return Err(Error::ProfileNotFound(name.to_string()));
        };
        profile.validated = validated;
        Ok(())
    }

    /// Delete the named profile.
    ///
    /// Rejected when it is the last remaining profile. When the active
    /// profile is deleted, the first remaining one becomes active. Returns
    /// `true` when the active selection changed.
    pub fn delete(&mut self, name: &str) -> Result<bool> {
        let Some(index) = self.profiles.iter().position(|p| p.name == name) else {
            return Err(Error::ProfileNotFound(name.to_string()));
        };
        if self.profiles.len() == 1 {
            return Err(Error::LastProfile);
        }

        self.profiles.remove(index);
        debug!(profile = %name, "deleted profile");

        if self.active == name {
            self.active = self.profiles[0].name.clone();
            return Ok(true);
        }
        Ok(false)
    }

    fn insert(&mut self, profile: CredentialProfile) {
        if self.profiles.is_empty() {
            self.active = profile.name.clone();
        }
        self.profiles.push(profile);
    }
}

/// One profile definition as it appears in a TOML seed file.
///
/// ```toml
/// [studio]
/// provider = "pollinations"
/// auth_mode = "token"
/// token = "pk-..."
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSeed {
    pub provider: ProviderKind,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub auth_mode: Option<AuthMode>,
    #[serde(default)]
    pub referrer: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl ProfileSeed {
    fn to_profile(&self, name: String) -> CredentialProfile {
        let mut profile = CredentialProfile::defaults(name, self.provider);
        if let Some(url) = &self.base_url {
            profile.base_url = url.clone();
        }
        if let Some(key) = &self.api_key {
            profile.api_key = ApiKey::new(key.clone());
        }
        if let Some(mode) = self.auth_mode {
            profile.auth_mode = mode;
        }
        if let Some(referrer) = &self.referrer {
            profile.referrer = referrer.clone();
        }
        if let Some(token) = &self.token {
            profile.token = ApiKey::new(token.clone());
        }
        profile
    }
}

/// Load seed profiles from a TOML file, installing the default profile when
/// the file is missing or defines none.
pub fn load_profiles(path: &std::path::Path) -> Result<ProfileStore> {
    match std::fs::read_to_string(path) {
        Ok(doc) => ProfileStore::from_toml_str(&doc),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ProfileStore::with_default()),
        Err(e) => Err(Error::Configuration(format!(
            "failed to read {}: {e}",
            path.display()
        ))),
    }
}
