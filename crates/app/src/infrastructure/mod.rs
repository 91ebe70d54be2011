//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod advice_slip;
pub mod clock;
pub mod mymemory;
pub mod ports;
pub mod storage;
