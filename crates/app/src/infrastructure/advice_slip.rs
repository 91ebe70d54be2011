//! Advice Slip API client (https://api.adviceslip.com).

use std::sync::Arc;
use std::time::Duration;

use advicebook_domain::RawAdviceId;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::infrastructure::ports::{AdviceSource, ClockPort, ExternalError, FetchedAdvice};

/// Default Advice Slip base URL.
pub const DEFAULT_ADVICE_API_URL: &str = "https://api.adviceslip.com";

/// Client for the Advice Slip random-advice endpoint.
#[derive(Clone)]
pub struct AdviceSlipClient {
    client: Client,
    base_url: String,
    clock: Arc<dyn ClockPort>,
}

impl AdviceSlipClient {
    pub fn new(base_url: &str, timeout: Duration, clock: Arc<dyn ClockPort>) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            clock,
        }
    }
}

#[async_trait]
impl AdviceSource for AdviceSlipClient {
    async fn random_advice(&self) -> Result<FetchedAdvice, ExternalError> {
        let now_millis = self.clock.now().timestamp_millis();

        // The API caches responses for a couple of seconds; the timestamp busts that.
        let response = self
            .client
            .get(format!("{}/advice", self.base_url))
            .query(&[("timestamp", now_millis)])
            .send()
            .await
            .map_err(|e| ExternalError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ExternalError::RequestFailed(format!(
                "advice source returned {}",
                response.status()
            )));
        }

        // Served as text/html, so decode the body by hand.
        let body = response
            .text()
            .await
            .map_err(|e| ExternalError::RequestFailed(e.to_string()))?;

        let advice = parse_slip(&body, now_millis)?;
        tracing::debug!(id = %advice.id, "Fetched advice");
        Ok(advice)
    }
}

#[derive(Debug, Deserialize)]
struct SlipResponse {
    #[serde(default)]
    slip: Option<Slip>,
}

#[derive(Debug, Deserialize)]
struct Slip {
    #[serde(default)]
    id: Option<RawAdviceId>,
    #[serde(default)]
    slip_id: Option<RawAdviceId>,
    #[serde(default)]
    advice: Option<String>,
}

/// Extract the advice from a response body.
///
/// Falls back to `fallback_id` (a unix-millis timestamp) when the slip
/// carries no id at all.
fn parse_slip(body: &str, fallback_id: i64) -> Result<FetchedAdvice, ExternalError> {
    let response: SlipResponse = serde_json::from_str(body)
        .map_err(|e| ExternalError::InvalidResponse(e.to_string()))?;

    let slip = response
        .slip
        .ok_or_else(|| ExternalError::InvalidResponse("response has no slip".into()))?;

    let text = slip
        .advice
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ExternalError::InvalidResponse("slip has no advice text".into()))?;

    let id = slip
        .id
        .or(slip.slip_id)
        .unwrap_or(RawAdviceId::Signed(fallback_id));

    Ok(FetchedAdvice { id, text })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_slip_id() {
        let body = r#"{"slip": {"id": 117, "advice": "Never pet a burning dog."}}"#;
        let advice = parse_slip(body, 0).expect("parse");
        assert_eq!(advice.id.normalized(), "117");
        assert_eq!(advice.text, "Never pet a burning dog.");
    }

    #[test]
    fn accepts_legacy_slip_id_field() {
        let body = r#"{"slip": {"slip_id": "42", "advice": "Smile."}}"#;
        let advice = parse_slip(body, 0).expect("parse");
        assert_eq!(advice.id.normalized(), "42");
    }

    #[test]
    fn falls_back_to_timestamp_when_id_missing() {
        let body = r#"{"slip": {"advice": "Smile."}}"#;
        let advice = parse_slip(body, 1_700_000_000_123).expect("parse");
        assert_eq!(advice.id.normalized(), "1700000000123");
    }

    #[test]
    fn missing_slip_is_invalid() {
        let body = r#"{"message": {"type": "error", "text": "No slip found."}}"#;
        assert!(matches!(
            parse_slip(body, 0),
            Err(ExternalError::InvalidResponse(_))
        ));
    }

    #[test]
    fn blank_advice_is_invalid() {
        let body = r#"{"slip": {"id": 1, "advice": "   "}}"#;
        assert!(parse_slip(body, 0).is_err());
    }

    #[test]
    fn non_json_body_is_invalid() {
        assert!(parse_slip("<html></html>", 0).is_err());
    }
}
