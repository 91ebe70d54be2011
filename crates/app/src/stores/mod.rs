//! Stores built on top of the key-value backing store.

mod favorites;

pub use favorites::{FavoritesError, FavoritesOutcome, FavoritesStore};
