//! Model management for easel.
//!
//! This crate provides:
//! - Credential profiles with per-provider validation
//! - Provider adapters behind a unified [`providers::ImageProvider`] trait
//! - A merged registry of static and discovered models
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   ModelRegistry                      │
//! │        static catalog  ∪  discovered models          │
//! └─────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                   ImageProvider                      │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  │
//! │  │ Pollinations│  │   OpenAI-   │  │ HuggingFace │  │
//! │  │  (free GET) │  │  compatible │  │ (token POST)│  │
//! │  └─────────────┘  └─────────────┘  └─────────────┘  │
//! └─────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                   ProfileStore                       │
//! │        (named credential profiles, one active)       │
//! └─────────────────────────────────────────────────────┘
//! ```

mod error;
mod types;

pub mod auth;
pub mod catalog;
pub mod providers;
pub mod registry;

pub use error::{Error, Result};
pub use registry::{CategoryGroup, ModelFilter, ModelRegistry, RegistrySnapshot};
pub use types::{
    ModelCategory, ModelDescriptor, ProviderKind, QualityTag, SpeedTag, prettify_model_name,
};
