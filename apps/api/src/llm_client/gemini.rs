//! Google Gemini `generateContent` backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{error_message, LlmError, TextProvider};

pub const MODEL: &str = "gemini-pro";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    fn text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

pub struct GeminiProvider {
    client: Client,
    url: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(client: Client, base_url: &str, api_key: String) -> Self {
        Self {
            client,
            url: format!("{base_url}/v1beta/models/{MODEL}:generateContent"),
            api_key,
        }
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: max_tokens,
            },
        };

        debug!(model = MODEL, prompt_len = prompt.len(), "Sending request to Gemini");

        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error_message(body),
            });
        }

        let generated: GenerateContentResponse = response.json().await?;
        generated.text().ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::test_support::spawn_stub;
    use axum::{
        extract::Query,
        http::{StatusCode, Uri},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    // The model path carries a colon, so stubs are mounted as fallbacks and echo the path.
    async fn echo_generate(
        uri: Uri,
        Query(params): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        Json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": format!(
                            "{}|{}|",
                            uri.path(),
                            params.get("key").cloned().unwrap_or_default()
                        )},
                        {"text": format!(
                            "{}|{}",
                            body["generationConfig"]["maxOutputTokens"],
                            body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default()
                        )}
                    ]
                }
            }]
        }))
    }

    #[tokio::test]
    async fn test_complete_joins_parts_and_passes_key_as_query() {
        let base = spawn_stub(Router::new().fallback(echo_generate)).await;
        let provider = GeminiProvider::new(Client::new(), &base, "g-key".to_string());

        let text = provider.complete("Describe it", 300).await.unwrap();

        assert_eq!(
            text,
            "/v1beta/models/gemini-pro:generateContent|g-key|300|Describe it"
        );
    }

    #[tokio::test]
    async fn test_blocked_prompt_without_candidates_is_empty_content() {
        let router = Router::new()
            .fallback(|| async { Json(json!({"promptFeedback": {"blockReason": "SAFETY"}})) });
        let base = spawn_stub(router).await;
        let provider = GeminiProvider::new(Client::new(), &base, "g-key".to_string());

        let err = provider.complete("Describe it", 300).await.unwrap_err();

        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let router = Router::new().fallback(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": {"code": 400, "message": "API key not valid"}})),
            )
        });
        let base = spawn_stub(router).await;
        let provider = GeminiProvider::new(Client::new(), &base, "nope".to_string());

        let err = provider.complete("Describe it", 300).await.unwrap_err();

        assert_eq!(err.to_string(), "API error (status 400): API key not valid");
    }
}
