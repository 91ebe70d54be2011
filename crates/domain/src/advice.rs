//! Advice records.
//!
//! The wire field names (`slip_id`, `advice`) match the advice source, so a
//! persisted favorites blob reads the same as the API payload it came from.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{AdviceId, RawAdviceId};

/// A favorited piece of advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    #[serde(rename = "slip_id")]
    id: AdviceId,
    #[serde(rename = "advice")]
    text: String,
}

impl Advice {
    pub fn new(id: AdviceId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    pub fn id(&self) -> &AdviceId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, keeping the identity.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// A candidate record whose id has not been validated yet.
///
/// This is what callers hand to the favorites store: the id may be a number
/// straight from the advice source, or user-typed text.
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceDraft {
    pub id: RawAdviceId,
    pub text: String,
}

impl AdviceDraft {
    pub fn new(id: impl Into<RawAdviceId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Validate the id and produce a storable record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidId` if the id normalizes to an empty
    /// string or to `"undefined"`.
    pub fn into_advice(self) -> Result<Advice, DomainError> {
        let id = AdviceId::new(self.id)?;
        Ok(Advice::new(id, self.text))
    }
}

/// A text edit targeting an existing record.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvicePatch {
    pub id: RawAdviceId,
    pub text: String,
}

impl AdvicePatch {
    pub fn new(id: impl Into<RawAdviceId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Whether this patch targets the given record.
    pub fn targets(&self, advice: &Advice) -> bool {
        advice.id().as_str() == self.id.normalized()
    }
}
