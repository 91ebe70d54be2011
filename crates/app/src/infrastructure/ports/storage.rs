//! Key-value backing store port.

use async_trait::async_trait;

use super::error::StorageError;

/// Asynchronous, process-wide, string-keyed storage.
///
/// `set` fully overwrites the slot. Implementations must be safe to share
/// across tasks; ordering between concurrent callers is the caller's problem.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Load the value under `key`, `None` if it was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Storage key constants
///
/// Kept in the ports layer as they define the contract for which slots the
/// app owns in a shared store.
pub mod storage_keys {
    pub const FAVORITES: &str = "@advice_favorites";
}
