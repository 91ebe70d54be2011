//! File-backed key-value store.
//!
//! Stores every slot in one JSON object at (by default):
//! - Linux: ~/.config/advicebook/storage.json
//! - macOS: ~/Library/Application Support/io.advicebook.advicebook/storage.json
//! - Windows: C:\Users\<User>\AppData\Roaming\advicebook\advicebook\config\storage.json

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;
use tokio::fs;
use tokio::sync::Mutex;

use crate::infrastructure::ports::{KeyValueStore, StorageError};

const STORAGE_FILE_NAME: &str = "storage.json";

/// A `KeyValueStore` persisted as a JSON map on disk.
///
/// The file is read lazily on first access and cached. Every mutation writes
/// the whole map to a sibling temp file and renames it over the target, so a
/// crash mid-write leaves the previous contents intact.
pub struct FileKeyValueStore {
    path: PathBuf,
    /// `None` until the file has been read.
    cache: Mutex<Option<HashMap<String, String>>>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    /// Platform-specific storage path, falling back to the working directory.
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("io", "advicebook", "advicebook") {
            dirs.config_dir().join(STORAGE_FILE_NAME)
        } else {
            PathBuf::from("advicebook_storage.json")
        }
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut guard = self.cache.lock().await;
        if guard.is_none() {
            *guard = Some(load_entries(&self.path).await?);
        }
        Ok(guard.as_ref().and_then(|entries| entries.get(key).cloned()))
    }

    /// Persist a copy of the map with `key` replaced, then commit to cache.
    ///
    /// The cache only changes once the write succeeded.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.cache.lock().await;
        if guard.is_none() {
            *guard = Some(load_entries(&self.path).await?);
        }
        let entries = guard.get_or_insert_with(HashMap::new);

        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        persist_entries(&self.path, &next).await.map_err(|e| {
            tracing::error!(path = ?self.path, error = %e, "Failed to persist storage");
            e
        })?;
        *entries = next;
        Ok(())
    }
}

/// Read the map from disk.
///
/// A missing file is an empty map. An unparseable file is also treated as
/// empty (and will be replaced on the next write); a read failure is an error.
async fn load_entries(path: &Path) -> Result<HashMap<String, String>, StorageError> {
    let data = match fs::read_to_string(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = ?path, "Storage file not found, starting empty");
            return Ok(HashMap::new());
        }
        Err(e) => return Err(StorageError::Io(e)),
    };

    match serde_json::from_str::<HashMap<String, String>>(&data) {
        Ok(entries) => {
            tracing::debug!(path = ?path, slots = entries.len(), "Storage file loaded");
            Ok(entries)
        }
        Err(e) => {
            tracing::warn!(path = ?path, "Failed to parse storage file: {}", e);
            Ok(HashMap::new())
        }
    }
}

async fn persist_entries(
    path: &Path,
    entries: &HashMap<String, String>,
) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let data = serde_json::to_string_pretty(entries).map_err(StorageError::serialization)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, data).await?;
    fs::rename(&tmp_path, path).await?;
    Ok(())
}
