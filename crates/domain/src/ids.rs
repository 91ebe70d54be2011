//! Advice identities.
//!
//! The advice source hands out numeric ids, callers pass whatever they have
//! (numbers or strings), and the favorites collection compares ids only in
//! their normalized string form. `RawAdviceId` is the unnormalized input,
//! `AdviceId` is the validated result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Literal produced upstream when an id was never assigned.
const UNDEFINED_SENTINEL: &str = "undefined";

/// Largest float magnitude rendered without a fractional part.
const MAX_INTEGRAL_FLOAT: f64 = 1e15;

/// An identifier as supplied by a caller or read back from storage.
///
/// Deserializes from either a JSON number or a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAdviceId {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl RawAdviceId {
    /// The trimmed string form used for every comparison.
    ///
    /// Integral floats render without a fractional part, so `101.0` and
    /// `101` normalize to the same id.
    pub fn normalized(&self) -> String {
        match self {
            Self::Signed(n) => n.to_string(),
            Self::Unsigned(n) => n.to_string(),
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_INTEGRAL_FLOAT => {
                format!("{f:.0}")
            }
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }
}

impl fmt::Display for RawAdviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized())
    }
}

impl From<&str> for RawAdviceId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawAdviceId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for RawAdviceId {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for RawAdviceId {
    fn from(value: i64) -> Self {
        Self::Signed(value)
    }
}

impl From<i32> for RawAdviceId {
    fn from(value: i32) -> Self {
        Self::Signed(i64::from(value))
    }
}

impl From<u64> for RawAdviceId {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<u32> for RawAdviceId {
    fn from(value: u32) -> Self {
        Self::Unsigned(u64::from(value))
    }
}

impl From<&AdviceId> for RawAdviceId {
    fn from(value: &AdviceId) -> Self {
        Self::Text(value.0.clone())
    }
}

impl From<AdviceId> for RawAdviceId {
    fn from(value: AdviceId) -> Self {
        Self::Text(value.0)
    }
}

/// A validated advice identity (trimmed, non-empty, never `"undefined"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawAdviceId", into = "String")]
pub struct AdviceId(String);

impl AdviceId {
    /// Normalize and validate an identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidId` if the normalized id is empty or
    /// equals the literal `"undefined"`.
    pub fn new(raw: impl Into<RawAdviceId>) -> Result<Self, DomainError> {
        let normalized = raw.into().normalized();
        if normalized.is_empty() {
            return Err(DomainError::invalid_id("Advice id cannot be empty"));
        }
        if normalized == UNDEFINED_SENTINEL {
            return Err(DomainError::invalid_id("Advice id cannot be \"undefined\""));
        }
        Ok(Self(normalized))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AdviceId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<RawAdviceId> for AdviceId {
    type Error = DomainError;

    fn try_from(raw: RawAdviceId) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<AdviceId> for String {
    fn from(id: AdviceId) -> String {
        id.0
    }
}
