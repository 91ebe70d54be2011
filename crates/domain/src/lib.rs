//! AdviceBook domain types.
//!
//! Advice records and their identities. Everything here is pure: no I/O,
//! no async, no storage concerns.

pub mod advice;
pub mod error;
pub mod ids;

pub use advice::{Advice, AdviceDraft, AdvicePatch};
pub use error::DomainError;
pub use ids::{AdviceId, RawAdviceId};
