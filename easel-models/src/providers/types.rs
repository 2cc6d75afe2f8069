//! Canonical request and response types shared by all provider adapters.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ModelDescriptor;
use crate::{Error, Result};

/// Inclusive bounds for each image dimension, in pixels.
pub const MIN_DIMENSION: u32 = 256;
pub const MAX_DIMENSION: u32 = 2048;

/// Largest number of images one request may ask for.
pub const MAX_BATCH_SIZE: u32 = 4;

/// An image size parsed from a `WxH` string, both dimensions validated
/// against [`MIN_DIMENSION`]..=[`MAX_DIMENSION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    /// Create a size, validating both dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        for (axis, value) in [("width", width), ("height", height)] {
            if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
                return Err(Error::InvalidRequest(format!(
                    "{axis} {value} outside {MIN_DIMENSION}..={MAX_DIMENSION}"
                )));
            }
        }
        Ok(Self { width, height })
    }

    /// The default square size.
    pub fn square_1024() -> Self {
        Self {
            width: 1024,
            height: 1024,
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for ImageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((w, h)) = s.split_once('x') else {
            return Err(Error::InvalidRequest(format!(
                "size '{s}' is not in WxH form"
            )));
        };
        let width = w
            .trim()
            .parse()
            .map_err(|_| Error::InvalidRequest(format!("bad width in '{s}'")))?;
        let height = h
            .trim()
            .parse()
            .map_err(|_| Error::InvalidRequest(format!("bad height in '{s}'")))?;
        Self::new(width, height)
    }
}

impl TryFrom<String> for ImageSize {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ImageSize> for String {
    fn from(size: ImageSize) -> Self {
        size.to_string()
    }
}

/// Free-tier option bag.
///
/// Only the Pollinations adapter reads these; other adapters ignore the
/// whole bag. Defaults mirror the advanced-options panel: enhance, private,
/// and nologo on, safe off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub enhance: bool,
    pub private: bool,
    pub nologo: bool,
    pub safe: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            enhance: true,
            private: true,
            nologo: true,
            safe: false,
        }
    }
}

/// A canonical image-generation request, provider-agnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The prompt describing the desired image. Must be non-empty.
    pub prompt: String,
    /// Content to steer away from, for providers that support it.
    pub negative_prompt: Option<String>,
    /// Model id; must resolve in the merged registry for the active profile.
    pub model: String,
    /// Output dimensions.
    pub size: ImageSize,
    /// Number of images to generate, 1..=[`MAX_BATCH_SIZE`].
    pub n: u32,
    /// Style-preset suffix appended to the prompt before dispatch.
    pub style: Option<String>,
    /// Free-tier options.
    pub options: GenerationOptions,
}

impl GenerationRequest {
    /// Create a single-image request with default options.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            negative_prompt: None,
            model: model.into(),
            size: ImageSize::square_1024(),
            n: 1,
            style: None,
            options: GenerationOptions::default(),
        }
    }

    /// Check request invariants: non-empty prompt and batch bounds.
    ///
    /// Size bounds are enforced at [`ImageSize`] construction.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(Error::InvalidRequest("prompt must not be empty".into()));
        }
        if !(1..=MAX_BATCH_SIZE).contains(&self.n) {
            return Err(Error::InvalidRequest(format!(
                "batch size {} outside 1..={MAX_BATCH_SIZE}",
                self.n
            )));
        }
        Ok(())
    }

    /// The prompt with the style suffix appended, when one is set.
    ///
    /// Pure concatenation; the stored prompt is never mutated.
    pub fn styled_prompt(&self) -> String {
        match self.style.as_deref() {
            Some(suffix) if !suffix.is_empty() => format!("{}, {suffix}", self.prompt),
            _ => self.prompt.clone(),
        }
    }
}

/// One generated image: raw bytes plus the seed and batch position that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Raw image payload as returned by the provider.
    pub bytes: Vec<u8>,
    /// The per-unit seed drawn for this image.
    pub seed: u64,
    /// Position within the requested batch.
    pub index: u32,
}

/// Result of a discovery call: the models found plus an optional warning.
///
/// Discovery never raises; transport failures surface here as an empty map
/// with a warning attached.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub models: BTreeMap<String, ModelDescriptor>,
    pub warning: Option<String>,
}

impl Discovery {
    /// A degraded result: nothing discovered, with the reason attached.
    pub fn degraded(warning: impl Into<String>) -> Self {
        Self {
            models: BTreeMap::new(),
            warning: Some(warning.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_parses_wxh() {
        let size: ImageSize = "1080x1350".parse().unwrap();
        assert_eq!(size.width, 1080);
        assert_eq!(size.height, 1350);
        assert_eq!(size.to_string(), "1080x1350");
    }

    #[test]
    fn size_rejects_malformed_strings() {
        assert!("512".parse::<ImageSize>().is_err());
        assert!("512x".parse::<ImageSize>().is_err());
        assert!("wide x tall".parse::<ImageSize>().is_err());
    }

    #[test]
    fn size_rejects_out_of_bounds_dimensions() {
        assert!("0x512".parse::<ImageSize>().is_err());
        assert!("512x4096".parse::<ImageSize>().is_err());
        assert!("255x512".parse::<ImageSize>().is_err());
        // Both bounds are inclusive.
        assert!("256x2048".parse::<ImageSize>().is_ok());
    }

    #[test]
    fn size_serde_roundtrip() {
        let size = ImageSize::new(768, 512).unwrap();
        let json = serde_json::to_string(&size).unwrap();
        assert_eq!(json, "\"768x512\"");
        let back: ImageSize = serde_json::from_str(&json).unwrap();
        assert_eq!(back, size);
    }

    #[test]
    fn default_options_match_advanced_panel() {
        let options = GenerationOptions::default();
        assert!(options.enhance && options.private && options.nologo);
        assert!(!options.safe);
    }

    #[test]
    fn request_validation_enforces_prompt_and_batch() {
        let mut request = GenerationRequest::new("flux-dev", "a quiet harbor");
        assert!(request.validate().is_ok());

        request.prompt = "   ".to_string();
        assert!(request.validate().is_err());

        request.prompt = "a quiet harbor".to_string();
        request.n = 0;
        assert!(request.validate().is_err());
        request.n = MAX_BATCH_SIZE + 1;
        assert!(request.validate().is_err());
        request.n = MAX_BATCH_SIZE;
        assert!(request.validate().is_ok());
    }

    #[test]
    fn styled_prompt_appends_suffix() {
        let mut request = GenerationRequest::new("flux-dev", "a quiet harbor");
        assert_eq!(request.styled_prompt(), "a quiet harbor");

        request.style = Some("cinematic, dramatic lighting".to_string());
        assert_eq!(
            request.styled_prompt(),
            "a quiet harbor, cinematic, dramatic lighting"
        );

        request.style = Some(String::new());
        assert_eq!(request.styled_prompt(), "a quiet harbor");
    }
}
