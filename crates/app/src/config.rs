//! Runtime configuration.
//!
//! Read from environment variables (optionally seeded from `.env` files),
//! then overridden by CLI flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::infrastructure::advice_slip::DEFAULT_ADVICE_API_URL;
use crate::infrastructure::mymemory::{DEFAULT_LANGPAIR, DEFAULT_TRANSLATE_API_URL};
use crate::infrastructure::storage::FileKeyValueStore;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON file backing the key-value store.
    pub storage_path: PathBuf,
    pub advice_api_url: String,
    pub translate_api_url: String,
    /// MyMemory language pair, e.g. `en|pt-BR`.
    pub langpair: String,
    pub http_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: FileKeyValueStore::default_path(),
            advice_api_url: DEFAULT_ADVICE_API_URL.to_string(),
            translate_api_url: DEFAULT_TRANSLATE_API_URL.to_string(),
            langpair: DEFAULT_LANGPAIR.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Build from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup, falling back to defaults for
    /// anything unset, blank, or unparseable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let http_timeout = match var("HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(value = %raw, "Invalid HTTP_TIMEOUT_SECS, using default");
                    defaults.http_timeout
                }
            },
            None => defaults.http_timeout,
        };

        Self {
            storage_path: var("ADVICEBOOK_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            advice_api_url: var("ADVICE_API_URL").unwrap_or(defaults.advice_api_url),
            translate_api_url: var("TRANSLATE_API_URL").unwrap_or(defaults.translate_api_url),
            langpair: var("TRANSLATE_LANGPAIR").unwrap_or(defaults.langpair),
            http_timeout,
        }
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }
}

/// Load `.env.local` then `.env` from `dir`, if present.
///
/// Variables already set in the environment win. Runs before logging is
/// set up, so files that fail to load are returned for the caller to report.
pub fn load_dotenv(dir: &Path) -> Vec<(PathBuf, dotenvy::Error)> {
    let mut failures = Vec::new();
    for filename in [".env.local", ".env"] {
        let path = dir.join(filename);
        if path.exists() {
            if let Err(e) = dotenvy::from_path(&path) {
                failures.push((path, e));
            }
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.langpair, "en|pt-BR");
        assert_eq!(config.http_timeout, Duration::from_secs(15));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("ADVICEBOOK_STORAGE_PATH", "/tmp/favs.json"),
            ("ADVICE_API_URL", "http://localhost:9000"),
            ("TRANSLATE_LANGPAIR", "en|es"),
            ("HTTP_TIMEOUT_SECS", "3"),
        ]));
        assert_eq!(config.storage_path, PathBuf::from("/tmp/favs.json"));
        assert_eq!(config.advice_api_url, "http://localhost:9000");
        assert_eq!(config.langpair, "en|es");
        assert_eq!(config.http_timeout, Duration::from_secs(3));
    }

    #[test]
    fn blank_and_invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("TRANSLATE_LANGPAIR", "   "),
            ("HTTP_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(config.langpair, DEFAULT_LANGPAIR);
        assert_eq!(config.http_timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
    }

    #[test]
    fn missing_env_files_are_not_failures() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_dotenv(dir.path()).is_empty());
    }

    #[test]
    fn malformed_env_file_is_returned_as_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".env");
        std::fs::write(&path, "NOT A VALID LINE\n").expect("write .env");

        let failures = load_dotenv(dir.path());
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, path);
    }

    #[test]
    fn storage_path_can_be_overridden() {
        let config = AppConfig::from_lookup(|_| None).with_storage_path("/tmp/other.json");
        assert_eq!(config.storage_path, PathBuf::from("/tmp/other.json"));
    }
}
