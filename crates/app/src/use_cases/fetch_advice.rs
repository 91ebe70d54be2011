//! Fetch advice use case - pulls a random advice and translates it.

use std::sync::Arc;

use advicebook_domain::AdviceDraft;

use crate::infrastructure::ports::{AdviceSource, ExternalError, Translator};

/// Fetches a random piece of advice, translated into the configured language.
///
/// Translation is best-effort: if the translator fails the original text is
/// kept. The result is a draft ready for `FavoritesStore::save`.
pub struct FetchAdvice {
    source: Arc<dyn AdviceSource>,
    translator: Arc<dyn Translator>,
    langpair: String,
}

impl FetchAdvice {
    pub fn new(
        source: Arc<dyn AdviceSource>,
        translator: Arc<dyn Translator>,
        langpair: impl Into<String>,
    ) -> Self {
        Self {
            source,
            translator,
            langpair: langpair.into(),
        }
    }

    /// Fetch one advice, translating it unless `translate` is false.
    pub async fn execute(&self, translate: bool) -> Result<AdviceDraft, FetchAdviceError> {
        let fetched = self.source.random_advice().await?;
        if !translate {
            return Ok(AdviceDraft::new(fetched.id, fetched.text));
        }

        let text = match self.translator.translate(&fetched.text, &self.langpair).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(
                    id = %fetched.id,
                    langpair = %self.langpair,
                    error = %e,
                    "Translation failed, keeping original text"
                );
                fetched.text
            }
        };

        Ok(AdviceDraft::new(fetched.id, text))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchAdviceError {
    #[error("Advice source error: {0}")]
    Source(#[from] ExternalError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{FetchedAdvice, MockAdviceSource, MockTranslator};
    use advicebook_domain::RawAdviceId;

    fn source_returning(id: u64, text: &'static str) -> MockAdviceSource {
        let mut source = MockAdviceSource::new();
        source.expect_random_advice().returning(move || {
            Ok(FetchedAdvice {
                id: RawAdviceId::from(id),
                text: text.to_string(),
            })
        });
        source
    }

    #[tokio::test]
    async fn translates_fetched_advice() {
        let source = source_returning(101, "Be kind");
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .withf(|text, langpair| text == "Be kind" && langpair == "en|pt-BR")
            .times(1)
            .returning(|_, _| Ok("Seja gentil".to_string()));

        let use_case = FetchAdvice::new(Arc::new(source), Arc::new(translator), "en|pt-BR");
        let draft = use_case.execute(true).await.expect("fetch");

        assert_eq!(draft.id.normalized(), "101");
        assert_eq!(draft.text, "Seja gentil");
    }

    #[tokio::test]
    async fn keeps_original_text_when_translation_fails() {
        let source = source_returning(7, "Sleep more");
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .returning(|_, _| Err(ExternalError::RequestFailed("timeout".into())));

        let use_case = FetchAdvice::new(Arc::new(source), Arc::new(translator), "en|pt-BR");
        let draft = use_case.execute(true).await.expect("fetch");

        assert_eq!(draft.text, "Sleep more");
    }

    #[tokio::test]
    async fn skips_translator_when_disabled() {
        let source = source_returning(7, "Sleep more");
        let mut translator = MockTranslator::new();
        translator.expect_translate().never();

        let use_case = FetchAdvice::new(Arc::new(source), Arc::new(translator), "en|pt-BR");
        let draft = use_case.execute(false).await.expect("fetch");

        assert_eq!(draft.text, "Sleep more");
    }

    #[tokio::test]
    async fn source_failure_is_returned() {
        let mut source = MockAdviceSource::new();
        source
            .expect_random_advice()
            .returning(|| Err(ExternalError::InvalidResponse("no slip".into())));
        let mut translator = MockTranslator::new();
        translator.expect_translate().never();

        let use_case = FetchAdvice::new(Arc::new(source), Arc::new(translator), "en|pt-BR");
        assert!(matches!(
            use_case.execute(true).await,
            Err(FetchAdviceError::Source(ExternalError::InvalidResponse(_)))
        ));
    }
}
