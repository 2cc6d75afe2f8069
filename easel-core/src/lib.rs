//! easel-core: Orchestration layer for the easel image generation stack
//!
//! This crate drives batches end to end on top of `easel-models`:
//!
//! - **Session state** - [`SessionContext`] owning the profile store, the
//!   per-provider model registry, and both bounded stores
//! - **Batch orchestration** - [`generate::generate`] dispatching `n`
//!   independent units and aggregating partial failures into a
//!   [`GenerationOutcome`]
//! - **History and favorites** - [`HistoryStore`] (oldest-evicting) and
//!   [`FavoriteStore`] (insert-rejecting) with per-image ids
//! - **Presets** - curated style suffixes, negative prompts, and output
//!   sizes in [`presets`]
//!
//! # Quick Start
//!
//! ```no_run
//! use easel_core::{SessionContext, generate};
//! use easel_models::providers::GenerationRequest;
//!
//! async fn example() -> easel_models::Result<()> {
//!     let mut session = SessionContext::new();
//!     session.refresh_models().await?;
//!
//!     let request = GenerationRequest::new("flux-dev", "a lighthouse at dusk");
//!     let outcome = generate::generate(&mut session, &request).await?;
//!     println!("{} of {} images produced", outcome.succeeded.len(), outcome.attempted);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                 SessionContext                   │
//! │  ┌──────────────┐  ┌───────────────────────────┐ │
//! │  │ ProfileStore │  │ ModelRegistry (per kind)  │ │
//! │  └──────────────┘  └───────────────────────────┘ │
//! │  ┌──────────────┐  ┌───────────────────────────┐ │
//! │  │ HistoryStore │  │ FavoriteStore             │ │
//! │  └──────────────┘  └───────────────────────────┘ │
//! └───────────────┬──────────────────────────────────┘
//!                 │ generate::generate
//!                 ▼
//!        Box<dyn ImageProvider>  (one adapter per batch)
//! ```

pub mod generate;
pub mod history;
pub mod presets;
pub mod session;

pub use generate::{GenerationOutcome, UnitFailure};
pub use history::{
    EntryMetadata, FavoriteEntry, FavoriteStore, FavoriteToggle, HistoryEntry, HistoryStore,
    MAX_FAVORITE_ITEMS, MAX_HISTORY_ITEMS,
};
pub use session::SessionContext;
