//! Core types for model management.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of backend a profile talks to.
///
/// Each kind maps to one adapter implementation and carries its own default
/// endpoint and static model catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Pollinations.ai free-tier HTTP provider (one GET per image).
    Pollinations,
    /// NavyAI, an OpenAI-compatible hosted vendor.
    Navy,
    /// Any OpenAI-compatible images endpoint.
    OpenAiCompat,
    /// Hugging Face inference API (token-gated, one POST per image).
    HuggingFace,
}

impl ProviderKind {
    /// All provider kinds, in the order they are offered to the user.
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::Pollinations,
        ProviderKind::Navy,
        ProviderKind::HuggingFace,
        ProviderKind::OpenAiCompat,
    ];

    /// Default API endpoint for this provider kind.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Pollinations => "https://image.pollinations.ai",
            Self::Navy => "https://api.navy/v1",
            Self::OpenAiCompat => "https://api.openai.com/v1",
            Self::HuggingFace => "https://api-inference.huggingface.co",
        }
    }

    /// Human-readable provider name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pollinations => "Pollinations.ai Studio",
            Self::Navy => "NavyAI",
            Self::OpenAiCompat => "OpenAI-compatible API",
            Self::HuggingFace => "Hugging Face Inference",
        }
    }

    /// Whether this kind authenticates with a plain API key.
    ///
    /// Pollinations uses its own auth-mode scheme instead (free, referrer,
    /// or token).
    pub fn uses_api_key(&self) -> bool {
        !matches!(self, Self::Pollinations)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Category tag grouping models for display.
///
/// The known variants have a fixed display priority; categories first seen
/// at runtime become [`ModelCategory::Custom`] and sort after the known
/// ones in first-encountered order. Ordering affects presentation only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ModelCategory {
    Flux,
    StableDiffusion,
    Professional,
    Anime,
    Style,
    Community,
    OpenAi,
    Other,
    /// A category label not in the fixed set.
    Custom(String),
}

impl ModelCategory {
    /// Known categories in display-priority order.
    pub const PRIORITY: [ModelCategory; 8] = [
        ModelCategory::Flux,
        ModelCategory::StableDiffusion,
        ModelCategory::Professional,
        ModelCategory::Anime,
        ModelCategory::Style,
        ModelCategory::Community,
        ModelCategory::OpenAi,
        ModelCategory::Other,
    ];

    /// The display label for this category.
    pub fn label(&self) -> &str {
        match self {
            Self::Flux => "FLUX",
            Self::StableDiffusion => "Stable Diffusion",
            Self::Professional => "Professional",
            Self::Anime => "Anime",
            Self::Style => "Style",
            Self::Community => "Community",
            Self::OpenAi => "OpenAI",
            Self::Other => "Other",
            Self::Custom(s) => s,
        }
    }

    /// Classify a discovered model id into a category by keyword.
    ///
    /// Unrecognized ids land in `Community`, matching how runtime-discovered
    /// models are treated everywhere.
    pub fn classify(model_id: &str) -> Self {
        let id = model_id.to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|k| id.contains(k));

        if has(&["flux", "kontext"]) {
            Self::Flux
        } else if has(&["stable-diffusion", "sdxl", "sd"]) {
            Self::StableDiffusion
        } else if has(&["anime", "waifu", "anything"]) {
            Self::Anime
        } else if has(&["dall"]) {
            Self::OpenAi
        } else if has(&["midjourney", "playground"]) {
            Self::Professional
        } else {
            Self::Community
        }
    }
}

impl fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<ModelCategory> for String {
    fn from(c: ModelCategory) -> Self {
        c.label().to_string()
    }
}

impl From<String> for ModelCategory {
    fn from(s: String) -> Self {
        for known in ModelCategory::PRIORITY {
            if known.label() == s {
                return known;
            }
        }
        ModelCategory::Custom(s)
    }
}

/// Rough output-quality tag for a cataloged model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTag {
    Highest,
    High,
    Medium,
}

/// Rough generation-speed tag for a cataloged model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedTag {
    Fast,
    Medium,
    Slow,
}

/// Information about a single image model.
///
/// Descriptors come from the static per-provider catalogs or from runtime
/// discovery; ids are unique within a provider namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Model identifier as the provider knows it.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Display icon (emoji).
    pub icon: String,
    /// Display category.
    pub category: ModelCategory,
    /// Output-quality tag, when the catalog knows it.
    pub quality: Option<QualityTag>,
    /// Generation-speed tag, when the catalog knows it.
    pub speed: Option<SpeedTag>,
    /// One-line description, when the catalog carries one.
    pub description: Option<String>,
}

impl ModelDescriptor {
    /// Create a descriptor with defaults (robot icon, `Other` category).
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: "🤖".to_string(),
            category: ModelCategory::Other,
            quality: None,
            speed: None,
            description: None,
        }
    }

    /// Build a descriptor for a runtime-discovered model id.
    ///
    /// The display name is prettified from the id and the category comes
    /// from keyword classification.
    pub fn discovered(id: impl Into<String>, icon: &str) -> Self {
        let id = id.into();
        Self {
            name: prettify_model_name(&id),
            icon: icon.to_string(),
            category: ModelCategory::classify(&id),
            ..Self::new(id.clone(), id)
        }
    }

    /// Set the display icon.
    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }

    /// Set the display category.
    pub fn category(mut self, category: ModelCategory) -> Self {
        self.category = category;
        self
    }

    /// Set quality and speed tags together.
    pub fn tags(mut self, quality: QualityTag, speed: SpeedTag) -> Self {
        self.quality = Some(quality);
        self.speed = Some(speed);
        self
    }

    /// Set the one-line description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Turn a raw model id into a display name: separators become spaces and
/// each word is title-cased (`flux-1.1_pro` -> `Flux 1.1 Pro`).
pub fn prettify_model_name(id: &str) -> String {
    id.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_default_urls() {
        assert_eq!(
            ProviderKind::Pollinations.default_base_url(),
            "https://image.pollinations.ai"
        );
        assert_eq!(
            ProviderKind::HuggingFace.default_base_url(),
            "https://api-inference.huggingface.co"
        );
    }

    #[test]
    fn pollinations_does_not_use_api_key() {
        assert!(!ProviderKind::Pollinations.uses_api_key());
        assert!(ProviderKind::Navy.uses_api_key());
        assert!(ProviderKind::HuggingFace.uses_api_key());
    }

    #[test]
    fn category_roundtrips_through_string() {
        let cat: ModelCategory = String::from("Stable Diffusion").into();
        assert_eq!(cat, ModelCategory::StableDiffusion);

        let custom: ModelCategory = String::from("Experimental").into();
        assert_eq!(custom, ModelCategory::Custom("Experimental".to_string()));
        assert_eq!(custom.label(), "Experimental");
    }

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_string(&ModelCategory::Flux).unwrap();
        assert_eq!(json, "\"FLUX\"");

        let back: ModelCategory = serde_json::from_str("\"FLUX\"").unwrap();
        assert_eq!(back, ModelCategory::Flux);
    }

    #[test]
    fn classify_by_keyword() {
        assert_eq!(ModelCategory::classify("flux-schnell"), ModelCategory::Flux);
        assert_eq!(
            ModelCategory::classify("flux.1-kontext-pro"),
            ModelCategory::Flux
        );
        assert_eq!(
            ModelCategory::classify("sdxl-turbo"),
            ModelCategory::StableDiffusion
        );
        assert_eq!(
            ModelCategory::classify("waifu-diffusion"),
            ModelCategory::Anime
        );
        assert_eq!(ModelCategory::classify("dall-e-3"), ModelCategory::OpenAi);
        assert_eq!(
            ModelCategory::classify("midjourney-v6"),
            ModelCategory::Professional
        );
        assert_eq!(
            ModelCategory::classify("dreamshaper"),
            ModelCategory::Community
        );
    }

    #[test]
    fn prettify_replaces_separators_and_title_cases() {
        assert_eq!(prettify_model_name("flux-schnell"), "Flux Schnell");
        assert_eq!(
            prettify_model_name("stable_diffusion_xl"),
            "Stable Diffusion Xl"
        );
    }

    #[test]
    fn discovered_descriptor_is_classified() {
        let desc = ModelDescriptor::discovered("flux-realism", "🌸");
        assert_eq!(desc.id, "flux-realism");
        assert_eq!(desc.name, "Flux Realism");
        assert_eq!(desc.category, ModelCategory::Flux);
        assert_eq!(desc.icon, "🌸");
        assert!(desc.quality.is_none());
    }

    #[test]
    fn descriptor_builder_methods() {
        let desc = ModelDescriptor::new("flux-dev", "Flux Dev")
            .icon("🛠️")
            .category(ModelCategory::Flux)
            .tags(QualityTag::High, SpeedTag::Medium)
            .description("developer build");

        assert_eq!(desc.quality, Some(QualityTag::High));
        assert_eq!(desc.speed, Some(SpeedTag::Medium));
        assert_eq!(desc.description.as_deref(), Some("developer build"));
    }
}
