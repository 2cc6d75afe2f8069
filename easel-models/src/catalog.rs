//! Static per-provider model catalogs.
//!
//! These are the curated models each backend is known to serve, used as the
//! base layer of every registry merge. Runtime discovery overlays this set
//! and wins on id collisions.

use crate::types::{ModelCategory, ModelDescriptor, ProviderKind, QualityTag, SpeedTag};

use crate::types::ModelCategory::{
    Anime, Community, Flux, OpenAi, Professional, StableDiffusion, Style,
};
use crate::types::QualityTag::{High, Highest, Medium};
use crate::types::SpeedTag::{Fast, Medium as MediumSpeed, Slow};

/// The static catalog for a provider kind, in curated display order.
pub fn static_catalog(kind: ProviderKind) -> Vec<ModelDescriptor> {
    match kind {
        ProviderKind::Pollinations => pollinations_catalog(),
        ProviderKind::Navy => navy_catalog(),
        ProviderKind::OpenAiCompat => openai_catalog(),
        ProviderKind::HuggingFace => huggingface_catalog(),
    }
}

fn model(
    id: &str,
    name: &str,
    icon: &str,
    category: ModelCategory,
    quality: QualityTag,
    speed: SpeedTag,
    description: &str,
) -> ModelDescriptor {
    ModelDescriptor::new(id, name)
        .icon(icon)
        .category(category)
        .tags(quality, speed)
        .description(description)
}

fn pollinations_catalog() -> Vec<ModelDescriptor> {
    vec![
        // FLUX family
        model("flux-1.1-pro", "Flux 1.1 Pro", "🏆", Flux, Highest, Slow, "Latest flagship FLUX model, best quality"),
        model("flux.1-kontext-pro", "Flux.1 Kontext Pro", "🧠", Flux, High, MediumSpeed, "Enhanced context understanding"),
        model("flux.1-kontext-max", "Flux.1 Kontext Max", "👑", Flux, Highest, Slow, "Strongest context understanding"),
        model("flux-dev", "Flux Dev", "🛠️", Flux, High, MediumSpeed, "Developer build, balanced performance"),
        model("flux-schnell", "Flux Schnell", "⚡", Flux, Medium, Fast, "Fast generation build"),
        model("flux-realism", "Flux Realism", "📷", Flux, High, MediumSpeed, "Tuned for photorealism"),
        // Stable Diffusion family
        model("stable-diffusion-3.5-large", "SD 3.5 Large", "🎯", StableDiffusion, Highest, Slow, "Latest large SD model"),
        model("stable-diffusion-3.5-medium", "SD 3.5 Medium", "⚖️", StableDiffusion, High, MediumSpeed, "Balanced performance build"),
        model("stable-diffusion-xl", "SDXL 1.0", "💎", StableDiffusion, High, MediumSpeed, "High-resolution standard"),
        model("stable-diffusion-xl-turbo", "SDXL Turbo", "🚀", StableDiffusion, Medium, Fast, "Fast generation build"),
        model("stable-diffusion-2.1", "SD 2.1", "🔄", StableDiffusion, Medium, Fast, "Stable release"),
        model("stable-diffusion-1.5", "SD 1.5", "🔰", StableDiffusion, Medium, Fast, "Classic release"),
        // Professional models
        model("midjourney", "Midjourney", "🎭", Professional, Highest, MediumSpeed, "Artistic generation specialist"),
        model("dalle-3", "DALL-E 3", "🤖", Professional, Highest, MediumSpeed, "Latest OpenAI model"),
        model("playground-v2.5", "Playground v2.5", "🎪", Professional, High, MediumSpeed, "Commercial-grade model"),
        // Community models
        model("dreamshaper", "DreamShaper", "💫", Community, High, MediumSpeed, "Dreamlike style generation"),
        model("realistic-vision", "Realistic Vision", "👁️", Community, High, MediumSpeed, "Hyperrealism"),
        model("deliberate", "Deliberate", "🎨", Community, High, MediumSpeed, "Fine-grained control"),
        model("anything-v5", "Anything v5", "🌟", Anime, High, MediumSpeed, "General-purpose anime model"),
        model("waifu-diffusion", "Waifu Diffusion", "👩‍🎨", Anime, High, MediumSpeed, "Anime character specialist"),
        model("openjourney", "OpenJourney", "🗺️", Community, Medium, Fast, "Open-ended creation"),
        // Style models
        model("analog-diffusion", "Analog Film", "📸", Style, Medium, Fast, "Analog film photography look"),
        model("synthwave-diffusion", "Synthwave", "🌆", Style, Medium, Fast, "Synthwave aesthetics"),
        model("cyberpunk-anime", "Cyberpunk Anime", "🤖", Style, Medium, Fast, "Cyberpunk anime look"),
        model("pixel-art-xl", "Pixel Art XL", "🎮", Style, Medium, Fast, "Pixel art"),
    ]
}

fn navy_catalog() -> Vec<ModelDescriptor> {
    vec![
        model("flux-pro", "Flux Pro", "🏆", Flux, Highest, MediumSpeed, "Commercial-grade FLUX"),
        model("flux-schnell", "Flux Schnell", "⚡", Flux, Medium, Fast, "Fast generation"),
        model("stable-diffusion-xl", "SDXL", "💎", StableDiffusion, High, MediumSpeed, "High resolution"),
        model("midjourney-v6", "Midjourney v6", "🎭", Professional, Highest, MediumSpeed, "Latest Midjourney"),
    ]
}

fn huggingface_catalog() -> Vec<ModelDescriptor> {
    vec![
        model("stable-diffusion-v1-5", "SD 1.5 (HF)", "🔰", StableDiffusion, Medium, Fast, "Open-source classic"),
        model("stable-diffusion-xl-base-1.0", "SDXL Base (HF)", "💎", StableDiffusion, High, MediumSpeed, "Open-source SDXL"),
        model("flux-1-dev", "Flux.1 Dev (HF)", "🛠️", Flux, High, MediumSpeed, "Open-source FLUX"),
    ]
}

fn openai_catalog() -> Vec<ModelDescriptor> {
    vec![
        model("dall-e-3", "DALL-E 3", "🤖", OpenAi, Highest, MediumSpeed, "Latest DALL-E"),
        model("dall-e-2", "DALL-E 2", "🔄", OpenAi, High, Fast, "Classic DALL-E"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_kind_has_a_catalog() {
        for kind in ProviderKind::ALL {
            assert!(
                !static_catalog(kind).is_empty(),
                "{kind} catalog should not be empty"
            );
        }
    }

    #[test]
    fn catalog_ids_are_unique_per_provider() {
        for kind in ProviderKind::ALL {
            let catalog = static_catalog(kind);
            let ids: HashSet<_> = catalog.iter().map(|m| m.id.as_str()).collect();
            assert_eq!(ids.len(), catalog.len(), "duplicate id in {kind} catalog");
        }
    }

    #[test]
    fn pollinations_catalog_spans_categories() {
        let categories: HashSet<_> = pollinations_catalog()
            .into_iter()
            .map(|m| m.category)
            .collect();
        for expected in [Flux, StableDiffusion, Professional, Anime, Style, Community] {
            assert!(categories.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn every_catalog_entry_is_fully_tagged() {
        for kind in ProviderKind::ALL {
            for m in static_catalog(kind) {
                assert!(m.quality.is_some() && m.speed.is_some(), "{} untagged", m.id);
                assert!(m.description.is_some(), "{} missing description", m.id);
            }
        }
    }
}
