//! Gemini binding for the generative backend.
//!
//! The delegation call is one `generateContent` request with the system
//! prompt and the assembled context. The HTTP client carries its own
//! timeout, longer than the store's read timeout: context payloads are
//! full artifact bodies and the backend takes materially longer than a
//! row fetch.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{EstimationError, Result};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Seam for the external generative backend. The production binding is
/// Gemini; tests substitute a canned backend.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// One generation attempt. No retries here: transient failures are
    /// surfaced and the caller decides whether to reissue the tool call.
    async fn generate(&self, system_prompt: &str, context: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    fn classify(&self, e: reqwest::Error) -> EstimationError {
        if e.is_timeout() {
            EstimationError::Timeout(self.config.timeout)
        } else {
            EstimationError::Http(e)
        }
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, system_prompt: &str, context: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: format!("{system_prompt}\n\n{context}"),
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: 0.2,
                max_output_tokens: 8192,
                response_mime_type: "application/json",
            }),
        };

        let url = format!(
            "{GEMINI_BASE_URL}/{}:generateContent?key={}",
            self.config.model, self.config.api_key
        );

        log::debug!(
            "delegating estimation to {} ({} chars of context)",
            self.config.model,
            context.len()
        );

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            log::warn!("gemini returned {status}");
            return Err(EstimationError::Api {
                status: status.as_u16(),
                detail: text.trim().chars().take(300).collect(),
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| EstimationError::invalid_response(format!("bad envelope: {e}"), &text))?;

        let reply = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| EstimationError::invalid_response("no candidate text", &text))?;

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_the_gemini_wire_casing() {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: "hello".into(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: 0.2,
                max_output_tokens: 8192,
                response_mime_type: "application/json",
            }),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("generationConfig").is_some());
        assert!(value["generationConfig"].get("maxOutputTokens").is_some());
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn candidate_text_decodes_from_the_response_envelope() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"ok\": true}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.candidates[0].content.parts[0].text, "{\"ok\": true}");
    }
}
