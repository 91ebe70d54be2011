//! Application state and composition.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::infrastructure::{
    advice_slip::AdviceSlipClient,
    clock::SystemClock,
    mymemory::MyMemoryClient,
    ports::{AdviceSource, ClockPort, KeyValueStore, Translator},
    storage::FileKeyValueStore,
};
use crate::stores::FavoritesStore;
use crate::use_cases::FetchAdvice;

/// Main application state.
///
/// Holds the favorites store and the use cases the CLI drives.
pub struct App {
    pub favorites: Arc<FavoritesStore>,
    pub fetch_advice: FetchAdvice,
}

impl App {
    /// Wire the production adapters from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let storage: Arc<dyn KeyValueStore> =
            Arc::new(FileKeyValueStore::new(&config.storage_path));
        let source: Arc<dyn AdviceSource> = Arc::new(AdviceSlipClient::new(
            &config.advice_api_url,
            config.http_timeout,
            clock,
        ));
        let translator: Arc<dyn Translator> = Arc::new(MyMemoryClient::new(
            &config.translate_api_url,
            config.http_timeout,
        ));

        tracing::debug!(storage_path = ?config.storage_path, "Favorites storage configured");

        Self::new(storage, source, translator, config.langpair.clone())
    }

    /// Build from already-constructed ports.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        source: Arc<dyn AdviceSource>,
        translator: Arc<dyn Translator>,
        langpair: String,
    ) -> Self {
        Self {
            favorites: Arc::new(FavoritesStore::new(storage)),
            fetch_advice: FetchAdvice::new(source, translator, langpair),
        }
    }
}
