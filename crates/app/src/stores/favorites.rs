//! Favorites persistence.
//!
//! The whole favorites collection lives in one backing-store slot as a JSON
//! array. Every operation reads the slot, applies its change in memory, and
//! writes the full array back. Operations on one `FavoritesStore` are run one
//! at a time so two overlapping read-modify-write cycles can never clobber
//! each other.
//!
//! Faults never escape: a corrupt blob reads as an empty collection, and a
//! failing backing store is logged and reported through `FavoritesOutcome`.

use std::collections::HashSet;
use std::sync::Arc;

use advicebook_domain::{Advice, AdviceDraft, AdviceId, AdvicePatch, DomainError, RawAdviceId};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::infrastructure::ports::{storage_keys, KeyValueStore, StorageError};

/// What a mutating operation did.
///
/// Callers are free to ignore this; nothing here is fatal.
#[derive(Debug)]
pub enum FavoritesOutcome {
    /// The collection changed and was written back.
    Applied,
    /// Valid request with nothing to change (duplicate save, unknown id, ...).
    Unchanged,
    /// The candidate's identity was invalid. Nothing was written.
    Rejected(DomainError),
    /// The backing store failed. Nothing was written, or the write failed.
    Failed(FavoritesError),
}

impl FavoritesOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Errors that can occur talking to the backing store.
#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Tolerant on-disk shape: ids may be numbers, strings, null, or missing.
#[derive(Debug, Deserialize)]
struct StoredAdvice {
    #[serde(default)]
    slip_id: Option<RawAdviceId>,
    advice: String,
}

/// The favorites collection, persisted under a single backing-store key.
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    /// Held across each read-modify-write cycle.
    op_lock: Mutex<()>,
}

impl FavoritesStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(storage, storage_keys::FAVORITES)
    }

    pub fn with_key(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            op_lock: Mutex::new(()),
        }
    }

    /// All favorites in insertion order.
    ///
    /// Returns an empty list if nothing was stored, the stored data is
    /// corrupt, or the backing store fails.
    pub async fn list(&self) -> Vec<Advice> {
        match self.try_list().await {
            Ok(favorites) => favorites,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load favorites");
                Vec::new()
            }
        }
    }

    /// Like `list`, but a backing-store fault is returned instead of
    /// flattened to an empty list. Corrupt data still reads as empty.
    pub async fn try_list(&self) -> Result<Vec<Advice>, FavoritesError> {
        let _guard = self.op_lock.lock().await;
        self.read_collection().await
    }

    /// Look up one favorite by id.
    pub async fn get(&self, id: impl Into<RawAdviceId>) -> Option<Advice> {
        let target = id.into().normalized();
        self.list()
            .await
            .into_iter()
            .find(|advice| advice.id().as_str() == target)
    }

    /// Append a favorite unless one with the same id already exists.
    ///
    /// A duplicate id leaves the existing record untouched (the first save wins).
    pub async fn save(&self, draft: AdviceDraft) -> FavoritesOutcome {
        let raw_id = draft.id.clone();
        let advice = match draft.into_advice() {
            Ok(advice) => advice,
            Err(e) => {
                tracing::warn!(
                    id = %raw_id,
                    error = %e,
                    "Refusing to save favorite with invalid id"
                );
                return FavoritesOutcome::Rejected(e);
            }
        };

        let _guard = self.op_lock.lock().await;
        absorb("save", self.append(advice).await)
    }

    /// Replace the text of the favorite whose id matches.
    ///
    /// The collection is written back even when nothing matched.
    pub async fn update(&self, patch: AdvicePatch) -> FavoritesOutcome {
        let _guard = self.op_lock.lock().await;
        absorb("update", self.replace_text(&patch).await)
    }

    /// Remove the favorite with the given id, if any.
    ///
    /// The collection is written back even when nothing matched.
    pub async fn delete(&self, id: impl Into<RawAdviceId>) -> FavoritesOutcome {
        let target = id.into().normalized();
        let _guard = self.op_lock.lock().await;
        absorb("delete", self.remove(&target).await)
    }

    /// Replace the collection with an empty one.
    pub async fn clear(&self) -> FavoritesOutcome {
        let _guard = self.op_lock.lock().await;
        absorb("clear", self.truncate().await)
    }

    // -------------------------------------------------------------------------
    // Read-modify-write cycles. Callers must hold `op_lock`.
    // -------------------------------------------------------------------------

    async fn append(&self, advice: Advice) -> Result<FavoritesOutcome, FavoritesError> {
        let mut favorites = self.read_collection().await?;
        if favorites.iter().any(|existing| existing.id() == advice.id()) {
            tracing::debug!(id = %advice.id(), "Favorite already saved");
            return Ok(FavoritesOutcome::Unchanged);
        }

        let id = advice.id().clone();
        favorites.push(advice);
        self.write_collection(&favorites).await?;
        tracing::info!(id = %id, count = favorites.len(), "Favorite saved");
        Ok(FavoritesOutcome::Applied)
    }

    async fn replace_text(&self, patch: &AdvicePatch) -> Result<FavoritesOutcome, FavoritesError> {
        let mut favorites = self.read_collection().await?;

        let mut matched = false;
        for advice in favorites.iter_mut().filter(|advice| patch.targets(advice)) {
            advice.set_text(patch.text.clone());
            matched = true;
        }

        self.write_collection(&favorites).await?;
        if matched {
            tracing::info!(id = %patch.id, "Favorite updated");
            Ok(FavoritesOutcome::Applied)
        } else {
            tracing::debug!(id = %patch.id, "No favorite to update");
            Ok(FavoritesOutcome::Unchanged)
        }
    }

    async fn remove(&self, target: &str) -> Result<FavoritesOutcome, FavoritesError> {
        let mut favorites = self.read_collection().await?;
        let before = favorites.len();
        favorites.retain(|advice| advice.id().as_str() != target);
        let removed = before - favorites.len();

        self.write_collection(&favorites).await?;
        if removed > 0 {
            tracing::info!(id = %target, count = favorites.len(), "Favorite deleted");
            Ok(FavoritesOutcome::Applied)
        } else {
            tracing::debug!(id = %target, "No favorite to delete");
            Ok(FavoritesOutcome::Unchanged)
        }
    }

    async fn truncate(&self) -> Result<FavoritesOutcome, FavoritesError> {
        let previous = self.read_collection().await?;
        self.write_collection(&[]).await?;
        if previous.is_empty() {
            Ok(FavoritesOutcome::Unchanged)
        } else {
            tracing::info!(removed = previous.len(), "Favorites cleared");
            Ok(FavoritesOutcome::Applied)
        }
    }

    async fn read_collection(&self) -> Result<Vec<Advice>, FavoritesError> {
        let Some(blob) = self.storage.get(&self.key).await? else {
            tracing::debug!(key = %self.key, "No favorites stored yet");
            return Ok(Vec::new());
        };
        let favorites = decode_collection(&blob);
        tracing::debug!(key = %self.key, count = favorites.len(), "Favorites loaded");
        Ok(favorites)
    }

    async fn write_collection(&self, favorites: &[Advice]) -> Result<(), FavoritesError> {
        let blob = encode_collection(favorites)?;
        self.storage.set(&self.key, &blob).await?;
        tracing::debug!(key = %self.key, count = favorites.len(), "Favorites written");
        Ok(())
    }
}

/// Turn an operation's fault into a logged `Failed` outcome.
fn absorb(
    operation: &'static str,
    result: Result<FavoritesOutcome, FavoritesError>,
) -> FavoritesOutcome {
    result.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Favorites {} failed", operation);
        FavoritesOutcome::Failed(e)
    })
}

/// Decode a stored blob, recovering to empty on anything that isn't a JSON
/// array.
///
/// Elements are decoded one at a time: an element that isn't advice-shaped,
/// or whose id is missing or invalid, is dropped on its own. Only the first of
/// several entries sharing an id is kept.
fn decode_collection(blob: &str) -> Vec<Advice> {
    let elements: Vec<serde_json::Value> = match serde_json::from_str(blob) {
        Ok(elements) => elements,
        Err(e) => {
            tracing::warn!(error = %e, "Stored favorites are corrupt, treating as empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::with_capacity(elements.len());
    let mut favorites = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let record: StoredAdvice = match serde_json::from_value(element) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(index, error = %e, "Dropping malformed stored favorite");
                continue;
            }
        };
        let id = match record.slip_id.map(AdviceId::new) {
            Some(Ok(id)) => id,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Dropping stored favorite with invalid id");
                continue;
            }
            None => {
                tracing::warn!("Dropping stored favorite without an id");
                continue;
            }
        };
        if !seen.insert(id.clone()) {
            tracing::warn!(id = %id, "Dropping duplicate stored favorite");
            continue;
        }
        favorites.push(Advice::new(id, record.advice));
    }
    favorites
}

fn encode_collection(favorites: &[Advice]) -> Result<String, FavoritesError> {
    serde_json::to_string(favorites).map_err(|e| FavoritesError::Serialization(e.to_string()))
}
