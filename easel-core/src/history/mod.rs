//! Bounded history and favorites stores.
//!
//! Both stores are capacity-bounded but with deliberately different
//! overflow policies: history silently evicts its oldest entry, while
//! favorites reject the insert and tell the caller the store is full.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use easel_models::ProviderKind;
use easel_models::providers::{GeneratedImage, GenerationRequest, ImageSize};

/// How many generations the history keeps before evicting the oldest.
pub const MAX_HISTORY_ITEMS: usize = 20;

/// How many images can be starred before inserts are rejected.
pub const MAX_FAVORITE_ITEMS: usize = 40;

/// Context recorded alongside a generation's images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryMetadata {
    /// Which provider produced the batch.
    pub provider: ProviderKind,
    /// Style-preset suffix in effect, if any.
    pub style: Option<String>,
    /// How many units the batch attempted (successes may be fewer).
    pub attempted: u32,
    /// Display name of the model at generation time.
    pub model_name: String,
}

/// One recorded generation: a copy of the originating request's fields
/// plus the images it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub model: String,
    pub size: ImageSize,
    pub images: Vec<GeneratedImage>,
    pub metadata: EntryMetadata,
}

impl HistoryEntry {
    /// Create an entry for a finished generation, stamped now.
    pub fn new(
        request: &GenerationRequest,
        images: Vec<GeneratedImage>,
        metadata: EntryMetadata,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            prompt: request.prompt.clone(),
            negative_prompt: request.negative_prompt.clone(),
            model: request.model.clone(),
            size: request.size,
            images,
            metadata,
        }
    }

    /// The id of the image at a batch index: `"{entry-id}_{index}"`.
    ///
    /// Index-suffixing keeps image ids unique within one request.
    pub fn image_id(&self, index: u32) -> String {
        format!("{}_{index}", self.id)
    }

    /// Rebuild a request draft from this entry, for generating variations
    /// of a past prompt. Batch size and options reset to defaults.
    pub fn to_request_draft(&self) -> GenerationRequest {
        GenerationRequest {
            negative_prompt: self.negative_prompt.clone(),
            size: self.size,
            style: self.metadata.style.clone(),
            ..GenerationRequest::new(self.model.clone(), self.prompt.clone())
        }
    }
}

/// Newest-first bounded log of past generations.
///
/// Inserting beyond capacity silently evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::with_capacity(MAX_HISTORY_ITEMS)
    }
}

impl HistoryStore {
    /// A store with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with an explicit capacity (must be at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Insert an entry at the head, evicting the oldest beyond capacity.
    pub fn record(&mut self, entry: HistoryEntry) {
        debug!(id = %entry.id, model = %entry.model, "recording generation");
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Entries newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One starred image with a lookup-only back-reference to its history
/// entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteEntry {
    /// Image id, as produced by [`HistoryEntry::image_id`].
    pub image_id: String,
    /// Copy of the image payload; favorites outlive history eviction.
    pub bytes: Vec<u8>,
    pub timestamp: DateTime<Utc>,
    /// Id of the originating history entry, resolved via
    /// [`HistoryStore::get`] when it still exists.
    pub history_id: String,
}

/// Outcome of a favorite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    /// The image was not starred and is now.
    Added,
    /// The image was starred and no longer is.
    Removed,
    /// The store is at capacity; nothing changed.
    Full,
}

/// Bounded set of starred images.
///
/// Unlike history, an insert beyond capacity is rejected, never evicting;
/// removing an entry frees a slot.
#[derive(Debug, Clone)]
pub struct FavoriteStore {
    entries: Vec<FavoriteEntry>,
    capacity: usize,
}

impl Default for FavoriteStore {
    fn default() -> Self {
        Self::with_capacity(MAX_FAVORITE_ITEMS)
    }
}

impl FavoriteStore {
    /// A store with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with an explicit capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Star or unstar an image: add-if-absent, remove-if-present.
    ///
    /// Idempotent in the sense that two toggles return the state to where
    /// it started. At capacity, an add is refused with
    /// [`FavoriteToggle::Full`].
    pub fn toggle(&mut self, image_id: &str, bytes: &[u8], history_id: &str) -> FavoriteToggle {
        if let Some(position) = self.entries.iter().position(|f| f.image_id == image_id) {
            self.entries.remove(position);
            debug!(image_id, "removed favorite");
            return FavoriteToggle::Removed;
        }
        if self.entries.len() >= self.capacity {
            debug!(image_id, capacity = self.capacity, "favorites full, insert rejected");
            return FavoriteToggle::Full;
        }

        self.entries.push(FavoriteEntry {
            image_id: image_id.to_string(),
            bytes: bytes.to_vec(),
            timestamp: Utc::now(),
            history_id: history_id.to_string(),
        });
        debug!(image_id, "added favorite");
        FavoriteToggle::Added
    }

    /// Whether an image is currently starred.
    pub fn contains(&self, image_id: &str) -> bool {
        self.entries.iter().any(|f| f.image_id == image_id)
    }

    /// Favorites newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &FavoriteEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(prompt: &str) -> HistoryEntry {
        let request = GenerationRequest::new("flux-dev", prompt);
        HistoryEntry::new(
            &request,
            vec![GeneratedImage {
                bytes: vec![1, 2, 3],
                seed: 7,
                index: 0,
            }],
            EntryMetadata {
                provider: ProviderKind::Pollinations,
                style: None,
                attempted: 1,
                model_name: "Flux Dev".to_string(),
            },
        )
    }

    #[test]
    fn history_keeps_newest_first_and_evicts_oldest() {
        let mut store = HistoryStore::with_capacity(2);
        store.record(entry("first"));
        store.record(entry("second"));
        store.record(entry("third"));

        let prompts: Vec<&str> = store.iter().map(|e| e.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["third", "second"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn history_lookup_by_id() {
        let mut store = HistoryStore::new();
        let e = entry("a harbor");
        let id = e.id.clone();
        store.record(e);

        assert_eq!(store.get(&id).unwrap().prompt, "a harbor");
        assert!(store.get("missing").is_none());
        assert_eq!(store.latest().unwrap().id, id);
    }

    #[test]
    fn image_ids_are_index_suffixed() {
        let e = entry("a harbor");
        assert_eq!(e.image_id(0), format!("{}_0", e.id));
        assert_ne!(e.image_id(0), e.image_id(1));
    }

    #[test]
    fn request_draft_carries_prompt_fields() {
        let mut e = entry("a harbor");
        e.negative_prompt = Some("blurry".to_string());
        e.metadata.style = Some("pixel art".to_string());

        let draft = e.to_request_draft();
        assert_eq!(draft.prompt, "a harbor");
        assert_eq!(draft.negative_prompt.as_deref(), Some("blurry"));
        assert_eq!(draft.model, "flux-dev");
        assert_eq!(draft.style.as_deref(), Some("pixel art"));
        assert_eq!(draft.n, 1);
    }

    #[test]
    fn favorites_toggle_adds_then_removes() {
        let mut store = FavoriteStore::new();
        assert_eq!(store.toggle("img_0", &[1], "h1"), FavoriteToggle::Added);
        assert!(store.contains("img_0"));
        assert_eq!(store.toggle("img_0", &[1], "h1"), FavoriteToggle::Removed);
        assert!(!store.contains("img_0"));
        assert!(store.is_empty());
    }

    #[test]
    fn favorites_reject_insert_beyond_capacity() {
        let mut store = FavoriteStore::with_capacity(2);
        assert_eq!(store.toggle("a", &[1], "h1"), FavoriteToggle::Added);
        assert_eq!(store.toggle("b", &[2], "h1"), FavoriteToggle::Added);
        assert_eq!(store.toggle("c", &[3], "h1"), FavoriteToggle::Full);

        // Unchanged: the two original favorites are intact.
        assert_eq!(store.len(), 2);
        assert!(store.contains("a") && store.contains("b"));
        assert!(!store.contains("c"));
    }

    #[test]
    fn removing_a_favorite_frees_a_slot() {
        let mut store = FavoriteStore::with_capacity(2);
        store.toggle("a", &[1], "h1");
        store.toggle("b", &[2], "h1");

        assert_eq!(store.toggle("a", &[1], "h1"), FavoriteToggle::Removed);
        assert_eq!(store.toggle("c", &[3], "h1"), FavoriteToggle::Added);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn favorites_iterate_newest_first() {
        let mut store = FavoriteStore::new();
        store.toggle("a", &[1], "h1");
        store.toggle("b", &[2], "h1");

        let ids: Vec<&str> = store.iter().map(|f| f.image_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
