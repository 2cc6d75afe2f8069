//! Image provider trait and adapter implementations.
//!
//! The [`ImageProvider`] trait is the unified interface over every backend:
//! a free HTTP provider (Pollinations), OpenAI-compatible endpoints
//! (including NavyAI), and the token-gated Hugging Face inference API.
//! Adapters translate the canonical [`GenerationRequest`] into their wire
//! format and canonical discovery calls into per-provider endpoints.

mod huggingface;
mod openai;
mod pollinations;
mod types;

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

pub use huggingface::HuggingFaceProvider;
pub use openai::OpenAiCompatProvider;
pub use pollinations::PollinationsProvider;
pub use types::*;

use crate::auth::CredentialProfile;
use crate::types::ProviderKind;
use crate::Result;

/// How long one generation unit may take before it counts as failed.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// How long a discovery call may take; discovery is single-shot and
/// degrades to an empty set on timeout.
pub const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait implemented by every provider adapter.
///
/// Generation is best-effort at the unit level: each requested image is an
/// independent attempt, and a failing unit is recorded and skipped by the
/// caller. Adapters without native batching inherit the default
/// [`generate_batch`](ImageProvider::generate_batch), which loops
/// [`generate_one`](ImageProvider::generate_one) with one seed per unit;
/// the OpenAI-compatible adapter overrides it with a single `n`-embedded
/// call.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Which provider kind this adapter serves.
    fn kind(&self) -> ProviderKind;

    /// Discover the models this backend currently offers.
    ///
    /// Never fails: transport problems degrade to an empty mapping with a
    /// warning attached.
    async fn discover_models(&self) -> Discovery;

    /// Generate a single image for the given seed, returning raw bytes.
    async fn generate_one(&self, request: &GenerationRequest, seed: u64) -> Result<Vec<u8>>;

    /// Generate one image per seed, preserving seed order in the output.
    ///
    /// Each element is the outcome of one independent unit; errors are
    /// per-unit and never abort the remaining units.
    async fn generate_batch(
        &self,
        request: &GenerationRequest,
        seeds: &[u64],
    ) -> Vec<Result<GeneratedImage>> {
        let mut results = Vec::with_capacity(seeds.len());
        for (index, &seed) in seeds.iter().enumerate() {
            let unit = self
                .generate_one(request, seed)
                .await
                .map(|bytes| GeneratedImage {
                    bytes,
                    seed,
                    index: index as u32,
                });
            if let Err(e) = &unit {
                warn!(unit = index, error = %e, "generation unit failed, skipping");
            }
            results.push(unit);
        }
        results
    }
}

/// Build the adapter for a profile, keyed on its provider kind.
pub fn provider_for(profile: &CredentialProfile) -> Box<dyn ImageProvider> {
    match profile.provider {
        ProviderKind::Pollinations => Box::new(PollinationsProvider::from_profile(profile)),
        ProviderKind::Navy | ProviderKind::OpenAiCompat => {
            Box::new(OpenAiCompatProvider::from_profile(profile))
        }
        ProviderKind::HuggingFace => Box::new(HuggingFaceProvider::from_profile(profile)),
    }
}
