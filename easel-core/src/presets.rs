//! Curated style, negative-prompt, and size presets.
//!
//! Style presets expand to comma-joined suffix fragments appended to the
//! prompt before dispatch; negative presets are ready-made negative
//! prompts for common cleanup needs.

use easel_models::providers::ImageSize;

/// A named prompt suffix. An empty suffix means "leave the prompt alone".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylePreset {
    pub name: &'static str,
    pub suffix: &'static str,
}

pub const STYLE_PRESETS: &[StylePreset] = &[
    StylePreset { name: "None", suffix: "" },
    StylePreset {
        name: "Cinematic",
        suffix: "cinematic lighting, film grain, dramatic composition, anamorphic",
    },
    StylePreset {
        name: "Anime",
        suffix: "anime style, cel shading, vibrant colors, detailed linework",
    },
    StylePreset {
        name: "Cyberpunk",
        suffix: "cyberpunk, neon lights, rain-slicked streets, high tech low life",
    },
    StylePreset {
        name: "Portrait Photography",
        suffix: "portrait photography, 85mm lens, shallow depth of field, soft studio lighting",
    },
    StylePreset {
        name: "Street Photography",
        suffix: "street photography, candid, 35mm film, natural light",
    },
    StylePreset {
        name: "Landscape Photography",
        suffix: "landscape photography, golden hour, wide angle, ultra detailed",
    },
    StylePreset {
        name: "Impressionism",
        suffix: "impressionist painting, visible brushstrokes, soft light, plein air",
    },
    StylePreset {
        name: "Surrealism",
        suffix: "surrealist art, dreamlike, impossible geometry, symbolic imagery",
    },
    StylePreset {
        name: "Pop Art",
        suffix: "pop art, bold colors, halftone dots, screen print look",
    },
    StylePreset {
        name: "Ink Wash",
        suffix: "ink wash painting, sumi-e, minimal brushwork, rice paper texture",
    },
    StylePreset {
        name: "Watercolor",
        suffix: "watercolor painting, wet on wet, soft washes, paper texture",
    },
    StylePreset {
        name: "3D Render",
        suffix: "3d render, octane, global illumination, subsurface scattering",
    },
    StylePreset {
        name: "Pixel Art",
        suffix: "pixel art, 16-bit, limited palette, crisp dithering",
    },
    StylePreset {
        name: "Steampunk",
        suffix: "steampunk, brass and copper, victorian machinery, steam and gears",
    },
    StylePreset {
        name: "Fantasy Art",
        suffix: "fantasy art, epic scale, painterly, intricate detail",
    },
    StylePreset {
        name: "Sci-Fi Art",
        suffix: "science fiction art, futuristic, sleek surfaces, volumetric lighting",
    },
    StylePreset {
        name: "American Comic",
        suffix: "american comic book style, bold inks, dynamic poses, halftone shading",
    },
    StylePreset {
        name: "Manga",
        suffix: "manga style, screentone, expressive linework, black and white",
    },
    StylePreset {
        name: "Black & White Photography",
        suffix: "black and white photography, high contrast, fine grain, timeless",
    },
    StylePreset {
        name: "Vector Illustration",
        suffix: "vector illustration, flat design, clean shapes, minimal palette",
    },
    StylePreset {
        name: "Oil Painting",
        suffix: "oil painting, impasto, rich color, canvas texture",
    },
    StylePreset {
        name: "Pencil Sketch",
        suffix: "pencil sketch, graphite, cross hatching, loose gesture lines",
    },
    StylePreset {
        name: "Bauhaus",
        suffix: "bauhaus style, geometric forms, primary colors, functional minimalism",
    },
    StylePreset {
        name: "Art Deco",
        suffix: "art deco, geometric ornament, gold accents, symmetrical elegance",
    },
];

/// A named ready-made negative prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegativePreset {
    pub name: &'static str,
    pub prompt: &'static str,
}

pub const NEGATIVE_PRESETS: &[NegativePreset] = &[
    NegativePreset {
        name: "Basic",
        prompt: "blurry, low quality, low resolution, jpeg artifacts, watermark, text",
    },
    NegativePreset {
        name: "Photography",
        prompt: "overexposed, underexposed, noise, chromatic aberration, motion blur, watermark",
    },
    NegativePreset {
        name: "Portrait",
        prompt: "deformed face, extra fingers, bad anatomy, asymmetric eyes, plastic skin",
    },
    NegativePreset {
        name: "Anime",
        prompt: "bad anatomy, extra limbs, mutated hands, poorly drawn face, lowres",
    },
    NegativePreset {
        name: "Art",
        prompt: "amateur, ugly, messy composition, muddy colors, oversaturated, signature",
    },
];

/// A named output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePreset {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

pub const SIZE_PRESETS: &[SizePreset] = &[
    SizePreset { name: "Square 1024", width: 1024, height: 1024 },
    SizePreset { name: "Square 512", width: 512, height: 512 },
    SizePreset { name: "Portrait 768x1024", width: 768, height: 1024 },
    SizePreset { name: "Portrait 832x1216", width: 832, height: 1216 },
    SizePreset { name: "Landscape 1024x768", width: 1024, height: 768 },
    SizePreset { name: "Landscape 1216x832", width: 1216, height: 832 },
    SizePreset { name: "Widescreen 1344x768", width: 1344, height: 768 },
    SizePreset { name: "Vertical 768x1344", width: 768, height: 1344 },
    SizePreset { name: "Photo 1152x896", width: 1152, height: 896 },
    SizePreset { name: "Photo 896x1152", width: 896, height: 1152 },
    SizePreset { name: "Banner 1536x640", width: 1536, height: 640 },
    SizePreset { name: "Poster 640x1536", width: 640, height: 1536 },
];

impl SizePreset {
    /// The preset as a validated [`ImageSize`]. All presets are within the
    /// supported dimension range.
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height).unwrap_or_else(|_| ImageSize::square_1024())
    }
}

/// The suffix for a named style. `Some("")` for "None", `None` for an
/// unknown name.
pub fn style_suffix(name: &str) -> Option<&'static str> {
    STYLE_PRESETS
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.suffix)
}

/// The ready-made negative prompt for a named preset.
pub fn negative_preset(name: &str) -> Option<&'static str> {
    NEGATIVE_PRESETS
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_lookup_resolves_known_names() {
        assert_eq!(style_suffix("None"), Some(""));
        assert!(style_suffix("Cyberpunk").unwrap().contains("neon"));
        assert_eq!(style_suffix("nonexistent"), None);
    }

    #[test]
    fn negative_lookup_resolves_known_names() {
        assert!(negative_preset("Basic").unwrap().contains("watermark"));
        assert_eq!(negative_preset("nonexistent"), None);
    }

    #[test]
    fn preset_names_are_unique() {
        for (i, a) in STYLE_PRESETS.iter().enumerate() {
            for b in &STYLE_PRESETS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
        for (i, a) in SIZE_PRESETS.iter().enumerate() {
            for b in &SIZE_PRESETS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn all_size_presets_are_valid_dimensions() {
        for preset in SIZE_PRESETS {
            let size = preset.size();
            assert_eq!((size.width, size.height), (preset.width, preset.height));
        }
    }
}
