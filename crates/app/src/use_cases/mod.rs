//! Use cases - User story orchestration.

pub mod fetch_advice;

pub use fetch_advice::{FetchAdvice, FetchAdviceError};
