//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the app. Ports exist for:
//! - The key-value backing store (could swap file -> platform storage)
//! - The advice source and translation APIs
//! - Clock (for testing)

mod error;
mod external;
mod storage;
mod testing;

// =============================================================================
// Errors
// =============================================================================
pub use error::{ExternalError, StorageError};

// =============================================================================
// Storage Ports
// =============================================================================
pub use storage::{storage_keys, KeyValueStore};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{AdviceSource, FetchedAdvice, Translator};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockAdviceSource, MockTranslator};

#[cfg(test)]
pub use storage::MockKeyValueStore;
