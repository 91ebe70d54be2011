//! AdviceBook application library.
//!
//! ## Structure
//!
//! - `stores/` - The favorites collection persisted over a key-value store
//! - `use_cases/` - Fetching (and translating) advice
//! - `infrastructure/` - Port traits and their adapters (storage, HTTP, clock)
//! - `config` - Environment-driven configuration
//! - `cli` - Command-line front end
//! - `app` - Application composition

pub mod app;
pub mod cli;
pub mod config;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;
pub use config::AppConfig;
pub use stores::{FavoritesError, FavoritesOutcome, FavoritesStore};
