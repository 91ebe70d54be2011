//! Remote collaborator ports.

use advicebook_domain::RawAdviceId;
use async_trait::async_trait;

use super::error::ExternalError;

/// A freshly fetched piece of advice, id not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedAdvice {
    pub id: RawAdviceId,
    pub text: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdviceSource: Send + Sync {
    async fn random_advice(&self) -> Result<FetchedAdvice, ExternalError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` for a language pair such as `en|pt-BR`.
    async fn translate(&self, text: &str, langpair: &str) -> Result<String, ExternalError>;
}
