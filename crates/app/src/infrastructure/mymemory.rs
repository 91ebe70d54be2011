//! MyMemory translation client (https://mymemory.translated.net).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::infrastructure::ports::{ExternalError, Translator};

/// Default MyMemory base URL.
pub const DEFAULT_TRANSLATE_API_URL: &str = "https://api.mymemory.translated.net";

/// Default language pair.
pub const DEFAULT_LANGPAIR: &str = "en|pt-BR";

#[derive(Clone)]
pub struct MyMemoryClient {
    client: Client,
    base_url: String,
}

impl MyMemoryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Translator for MyMemoryClient {
    async fn translate(&self, text: &str, langpair: &str) -> Result<String, ExternalError> {
        let response = self
            .client
            .get(format!("{}/get", self.base_url))
            .query(&[("q", text), ("langpair", langpair)])
            .send()
            .await
            .map_err(|e| ExternalError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ExternalError::RequestFailed(format!(
                "translator returned {}",
                response.status()
            )));
        }

        let body: TranslationResponse = response
            .json()
            .await
            .map_err(|e| ExternalError::InvalidResponse(e.to_string()))?;

        extract_translation(body)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationResponse {
    response_data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: Option<String>,
}

fn extract_translation(body: TranslationResponse) -> Result<String, ExternalError> {
    body.response_data
        .and_then(|data| data.translated_text)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ExternalError::InvalidResponse("missing translatedText".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<String, ExternalError> {
        let body: TranslationResponse = serde_json::from_str(body).expect("valid json");
        extract_translation(body)
    }

    #[test]
    fn extracts_translated_text() {
        let body = r#"{
            "responseData": {"translatedText": "Seja gentil", "match": 1},
            "responseStatus": 200
        }"#;
        assert_eq!(parse(body).expect("translation"), "Seja gentil");
    }

    #[test]
    fn missing_response_data_is_invalid() {
        let body = r#"{"responseStatus": "403", "responseDetails": "INVALID LANGUAGE PAIR"}"#;
        assert!(matches!(parse(body), Err(ExternalError::InvalidResponse(_))));
    }

    #[test]
    fn empty_translation_is_invalid() {
        let body = r#"{"responseData": {"translatedText": ""}}"#;
        assert!(parse(body).is_err());
    }
}
