/// Gemini chat proxy client
///
/// Thin client over the Gemini `generateContent` REST endpoint. The chat
/// route never surfaces an HTTP error to the caller: a missing key or a
/// failed upstream call resolves to a human-readable string that the web
/// client renders as the bot reply.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// Gemini generateContent endpoint
const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

/// Upper bound on a single upstream call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Reply returned when no API key is configured
const MISSING_KEY_REPLY: &str = "Gemini API key not configured.";

/// AI proxy error types
///
/// Internal only; `resolve_query` folds these into reply strings.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream replied with a non-success status
    #[error("Gemini returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),

    /// Upstream payload held no candidate text
    #[error("response contained no candidate text")]
    MissingCandidate,
}

/// Client for the Gemini chat proxy
///
/// Holds one `reqwest::Client` for connection reuse; cloning shares it.
#[derive(Clone)]
pub struct AiClient {
    http: Client,
    api_key: Option<String>,
}

impl AiClient {
    /// Creates a new client
    ///
    /// `api_key` is optional: without one the client still constructs and
    /// every query resolves to the "not configured" reply.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_key,
        }
    }

    /// Resolves a chat query to a reply string
    ///
    /// Infallible by contract: upstream failures are logged at `warn` and
    /// folded into a descriptive `"Gemini API error: …"` string.
    pub async fn resolve_query(&self, query: &str) -> String {
        let Some(api_key) = self.api_key.as_ref() else {
            return MISSING_KEY_REPLY.to_string();
        };

        match self.request_completion(api_key, query).await {
            Ok(text) => text,
            Err(err) => {
                warn!("Gemini request failed: {}", err);
                format!("Gemini API error: {}", err)
            }
        }
    }

    /// Posts the query upstream and extracts the first candidate text
    async fn request_completion(&self, api_key: &str, query: &str) -> Result<String, AiError> {
        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": query }] }]
        });

        let response = self
            .http
            .post(GEMINI_API_URL)
            .query(&[("key", api_key)])
            .timeout(REQUEST_TIMEOUT)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AiError::UpstreamStatus(status));
        }

        let body: GeminiResponse = response.json().await?;
        first_candidate_text(body).ok_or(AiError::MissingCandidate)
    }
}

/// Pulls the first candidate part that carries text
fn first_candidate_text(response: GeminiResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .flat_map(|candidate| candidate.content.parts)
        .find_map(|part| part.text)
}

#[derive(Debug, Default, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContent,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_resolve_query_without_key() {
        let client = AiClient::new(None);
        let reply = client.resolve_query("How many students enrolled?").await;
        assert_eq!(reply, "Gemini API key not configured.");
        assert_eq!(reply, MISSING_KEY_REPLY);
    }

    #[test]
    fn test_first_candidate_text_extracts() {
        let payload: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "Enrollment is up 12% this term." }]
                }
            }]
        }))
        .unwrap();

        assert_eq!(
            first_candidate_text(payload).as_deref(),
            Some("Enrollment is up 12% this term.")
        );
    }

    #[test]
    fn test_first_candidate_text_skips_textless_parts() {
        let payload: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "inlineData": { "mimeType": "image/png" } },
                        { "text": "second part" }
                    ]
                }
            }]
        }))
        .unwrap();

        assert_eq!(first_candidate_text(payload).as_deref(), Some("second part"));
    }

    #[test]
    fn test_first_candidate_text_malformed_payloads() {
        for value in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "content": {} }] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
        ] {
            let payload: GeminiResponse = serde_json::from_value(value).unwrap();
            assert_eq!(first_candidate_text(payload), None);
        }
    }
}
