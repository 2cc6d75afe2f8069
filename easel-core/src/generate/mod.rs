//! Batch generation orchestration.
//!
//! A batch of `n` requested images runs as `n` independent units, each
//! with its own seed. Units fail independently; the outcome aggregates
//! whatever succeeded together with a reason per failed unit. A batch
//! with at least one produced image is recorded in history.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use easel_models::providers::{GeneratedImage, GenerationRequest, ImageProvider, provider_for};
use easel_models::{Error, Result, prettify_model_name};

use crate::history::{EntryMetadata, HistoryEntry};
use crate::session::SessionContext;

/// Seeds are drawn uniformly from `0..SEED_SPACE`.
pub const SEED_SPACE: u64 = 1 << 32;

/// Why one unit of a batch produced no image.
#[derive(Debug, Clone, Serialize)]
pub struct UnitFailure {
    /// Position of the unit within the batch.
    pub index: u32,
    pub reason: String,
}

/// Aggregate result of one batch.
///
/// `succeeded` holds images in batch-index order; `attempted` is the
/// requested batch size, so `succeeded.len() + failures.len() == attempted`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub succeeded: Vec<GeneratedImage>,
    pub attempted: u32,
    pub failures: Vec<UnitFailure>,
}

impl GenerationOutcome {
    /// Whether the batch produced anything at all. A partial batch still
    /// counts as success; only zero produced images is failure.
    pub fn success(&self) -> bool {
        !self.succeeded.is_empty()
    }

    /// Whether some but not all units produced an image.
    pub fn is_partial(&self) -> bool {
        !self.succeeded.is_empty() && !self.failures.is_empty()
    }
}

/// Draw `n` distinct seeds, uniform over the seed space.
pub fn draw_seeds(n: u32) -> Vec<u64> {
    let mut rng = rand::thread_rng();
    let mut seeds: Vec<u64> = Vec::with_capacity(n as usize);
    while seeds.len() < n as usize {
        let seed = rng.gen_range(0..SEED_SPACE);
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }
    seeds
}

/// Generate a batch with the active profile's provider adapter.
pub async fn generate(
    session: &mut SessionContext,
    request: &GenerationRequest,
) -> Result<GenerationOutcome> {
    let provider = {
        let profile = session
            .active_profile()
            .ok_or_else(|| Error::Configuration("no active profile".to_string()))?;
        provider_for(profile)
    };
    generate_with(session, request, provider.as_ref()).await
}

/// Generate a batch with an explicit provider adapter.
///
/// Preflight checks run before the adapter is touched: the request must
/// be well-formed, the active profile validated, and the model present
/// in the merged registry. Any preflight failure returns an error
/// without a single provider call.
pub async fn generate_with(
    session: &mut SessionContext,
    request: &GenerationRequest,
    provider: &dyn ImageProvider,
) -> Result<GenerationOutcome> {
    request.validate()?;

    let profile = session
        .active_profile()
        .ok_or_else(|| Error::Configuration("no active profile".to_string()))?;
    if !profile.validated {
        return Err(Error::Configuration(format!(
            "profile '{}' has not been validated",
            profile.name
        )));
    }
    let provider_kind = profile.provider;

    if !session.registry().contains(&request.model) {
        return Err(Error::ModelNotFound(request.model.clone()));
    }
    let model_name = session
        .registry()
        .get(&request.model)
        .map(|d| d.name)
        .unwrap_or_else(|| prettify_model_name(&request.model));

    let seeds = draw_seeds(request.n);
    debug!(
        model = %request.model,
        n = request.n,
        provider = %provider_kind,
        "dispatching batch"
    );

    let results = provider.generate_batch(request, &seeds).await;

    let mut succeeded = Vec::new();
    let mut failures = Vec::new();
    for (index, unit) in results.into_iter().enumerate() {
        match unit {
            Ok(image) => succeeded.push(image),
            Err(e) => failures.push(UnitFailure {
                index: index as u32,
                reason: e.to_string(),
            }),
        }
    }

    if failures.is_empty() {
        debug!(produced = succeeded.len(), "batch complete");
    } else {
        warn!(
            produced = succeeded.len(),
            failed = failures.len(),
            "batch finished with failed units"
        );
    }

    if !succeeded.is_empty() {
        let entry = HistoryEntry::new(
            request,
            succeeded.clone(),
            EntryMetadata {
                provider: provider_kind,
                style: request.style.clone(),
                attempted: request.n,
                model_name,
            },
        );
        session.history.record(entry);
    }

    Ok(GenerationOutcome {
        succeeded,
        attempted: request.n,
        failures,
    })
}
