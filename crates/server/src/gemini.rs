//! Gemini generateContent client.
//!
//! The API key lives server-side only; browsers talk to the relay route in
//! `chat`, never to Gemini directly. The envelope is drilled down to the
//! single generated-text field; any missing layer is a typed failure the
//! assistant turns into a canned fallback.

use std::time::Duration;

use async_trait::async_trait;
use cartwheel_agent::{LlmClient, LlmError};
use cartwheel_core::config::LlmConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
}

impl GeminiClient {
    pub fn from_config(config: &LlmConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, key: &str) -> String {
        format!("{}/models/{}:generateContent?key={key}", self.base_url, self.model)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Pulls `candidates[0].content.parts[0].text` out of the response body.
fn extract_text(body: GenerateContentResponse) -> Result<String, LlmError> {
    body.candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::MalformedResponse("no candidates".to_string()))?
        .content
        .ok_or_else(|| LlmError::MalformedResponse("candidate has no content".to_string()))?
        .parts
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::MalformedResponse("content has no parts".to_string()))?
        .text
        .ok_or_else(|| LlmError::MalformedResponse("part has no text".to_string()))
}

fn map_transport_error(error: reqwest::Error) -> LlmError {
    if error.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Transport(error.to_string())
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_ref().ok_or(LlmError::MissingCredentials)?;

        let request_body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": GenerationConfig {
                temperature: 0.7,
                top_k: 1,
                top_p: 1.0,
                max_output_tokens: 2048,
            },
            "safetySettings": [
                { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" }
            ],
        });

        debug!(
            event_name = "llm.gemini.request",
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "sending generateContent request"
        );

        let response = self
            .http
            .post(self.endpoint(api_key.expose_secret()))
            .json(&request_body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(
                event_name = "llm.gemini.upstream_error",
                status = status.as_u16(),
                "generateContent returned a non-success status"
            );
            return Err(LlmError::Upstream { status: status.as_u16(), detail });
        }

        let body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|error| LlmError::MalformedResponse(error.to_string()))?;

        extract_text(body)
    }
}

#[cfg(test)]
mod tests {
    use cartwheel_agent::LlmError;

    use super::{extract_text, GenerateContentResponse};

    fn parse(raw: &str) -> GenerateContentResponse {
        serde_json::from_str(raw).expect("valid json")
    }

    #[test]
    fn extracts_the_first_candidate_text() {
        let body = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"H-E-B wins on freshness."}]}}]}"#,
        );
        assert_eq!(extract_text(body).unwrap(), "H-E-B wins on freshness.");
    }

    #[test]
    fn missing_candidates_is_a_typed_failure() {
        let body = parse(r#"{"candidates":[]}"#);
        assert!(matches!(extract_text(body), Err(LlmError::MalformedResponse(_))));

        let body = parse(r#"{}"#);
        assert!(matches!(extract_text(body), Err(LlmError::MalformedResponse(_))));
    }

    #[test]
    fn missing_parts_or_text_is_a_typed_failure() {
        let body = parse(r#"{"candidates":[{"content":{"parts":[]}}]}"#);
        assert!(matches!(extract_text(body), Err(LlmError::MalformedResponse(_))));

        let body = parse(r#"{"candidates":[{"content":{"parts":[{}]}}]}"#);
        assert!(matches!(extract_text(body), Err(LlmError::MalformedResponse(_))));

        let body = parse(r#"{"candidates":[{}]}"#);
        assert!(matches!(extract_text(body), Err(LlmError::MalformedResponse(_))));
    }
}
