//! Merged model registry for the active profile.
//!
//! The registry overlays runtime-discovered models onto the provider's
//! static catalog; discovered entries win on id collision. Discovery state
//! belongs to one profile selection: switching profiles builds a fresh
//! registry whose merge starts from the static catalog alone until
//! discovery runs again.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::catalog::static_catalog;
use crate::providers::Discovery;
use crate::types::{ModelCategory, ModelDescriptor, ProviderKind, QualityTag, SpeedTag};

/// The merged catalog of static and discovered models for one provider.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    kind: ProviderKind,
    discovered: BTreeMap<String, ModelDescriptor>,
}

impl ModelRegistry {
    /// A fresh registry for a provider kind, holding its static catalog
    /// and no discovered models.
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            discovered: BTreeMap::new(),
        }
    }

    /// The provider kind this registry serves.
    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Install the result of a discovery call, replacing any previous set.
    pub fn set_discovered(&mut self, discovery: Discovery) {
        debug!(
            kind = %self.kind,
            count = discovery.models.len(),
            "installing discovered models"
        );
        self.discovered = discovery.models;
    }

    /// Drop all discovered models, reverting to the static catalog.
    pub fn clear_discovered(&mut self) {
        self.discovered.clear();
    }

    /// Whether any discovered models are installed.
    pub fn has_discovered(&self) -> bool {
        !self.discovered.is_empty()
    }

    /// The merged model list: the static catalog in curated order with
    /// discovered entries overriding on id collision, followed by
    /// discovered-only entries.
    pub fn merged(&self) -> Vec<ModelDescriptor> {
        let mut models: Vec<ModelDescriptor> = static_catalog(self.kind)
            .into_iter()
            .map(|m| self.discovered.get(&m.id).cloned().unwrap_or(m))
            .collect();

        for (id, descriptor) in &self.discovered {
            if !models.iter().any(|m| &m.id == id) {
                models.push(descriptor.clone());
            }
        }
        models
    }

    /// Whether the merged registry resolves this model id.
    pub fn contains(&self, model_id: &str) -> bool {
        self.get(model_id).is_some()
    }

    /// Look up a model in the merged registry, discovered entries first.
    pub fn get(&self, model_id: &str) -> Option<ModelDescriptor> {
        if let Some(found) = self.discovered.get(model_id) {
            return Some(found.clone());
        }
        static_catalog(self.kind)
            .into_iter()
            .find(|m| m.id == model_id)
    }

    /// A plain serializable view for the presentation layer.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let models = self.merged();
        let groups = categorize(&models);
        RegistrySnapshot {
            provider: self.kind,
            models,
            groups,
        }
    }
}

/// Models grouped under one display category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    pub category: ModelCategory,
    pub models: Vec<ModelDescriptor>,
}

/// Plain-data registry view handed across the presentation boundary.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrySnapshot {
    pub provider: ProviderKind,
    pub models: Vec<ModelDescriptor>,
    pub groups: Vec<CategoryGroup>,
}

/// Group models by category in display order: the fixed priority list
/// first, then any remaining categories in first-encountered order.
///
/// Ordering affects presentation only, never selection logic.
pub fn categorize(models: &[ModelDescriptor]) -> Vec<CategoryGroup> {
    let mut order: Vec<ModelCategory> = Vec::new();
    for known in ModelCategory::PRIORITY {
        if models.iter().any(|m| m.category == known) {
            order.push(known);
        }
    }
    for model in models {
        if !order.contains(&model.category) {
            order.push(model.category.clone());
        }
    }

    order
        .into_iter()
        .map(|category| CategoryGroup {
            models: models
                .iter()
                .filter(|m| m.category == category)
                .cloned()
                .collect(),
            category,
        })
        .collect()
}

/// Display-side filter over a merged model list.
///
/// All criteria are conjunctive; the search term matches id, name,
/// description, or category label, case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ModelFilter {
    pub category: Option<ModelCategory>,
    pub quality: Option<QualityTag>,
    pub speed: Option<SpeedTag>,
    pub search: Option<String>,
}

impl ModelFilter {
    /// Whether a model passes every set criterion.
    pub fn matches(&self, model: &ModelDescriptor) -> bool {
        if let Some(category) = &self.category
            && &model.category != category
        {
            return false;
        }
        if let Some(quality) = self.quality
            && model.quality != Some(quality)
        {
            return false;
        }
        if let Some(speed) = self.speed
            && model.speed != Some(speed)
        {
            return false;
        }
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            let haystacks = [
                model.id.to_lowercase(),
                model.name.to_lowercase(),
                model.description.clone().unwrap_or_default().to_lowercase(),
                model.category.label().to_lowercase(),
            ];
            if !haystacks.iter().any(|h| h.contains(&term)) {
                return false;
            }
        }
        true
    }

    /// Apply this filter to a model list, preserving order.
    pub fn apply(&self, models: &[ModelDescriptor]) -> Vec<ModelDescriptor> {
        models.iter().filter(|m| self.matches(m)).cloned().collect()
    }
}
