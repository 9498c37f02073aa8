//! LLM Client — the single point of entry for all text-generation calls.
//!
//! No other module talks to a provider endpoint directly. Handlers resolve a
//! [`Provider`] from config, then ask [`LlmClient`] for the matching backend.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::config::Config;

pub mod gemini;
pub mod openai;
#[cfg(test)]
pub(crate) mod test_support;

use gemini::GeminiProvider;
use openai::OpenAiProvider;

const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A single text-generation backend. One call per prompt, no retries.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Display name used in error messages ("OpenAI", "Gemini").
    fn name(&self) -> &'static str;

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError>;
}

/// Which provider a request will use. OpenAI wins when both keys are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    OpenAi { api_key: String },
    Gemini { api_key: String },
    Unconfigured,
}

impl Provider {
    pub fn from_config(config: &Config) -> Self {
        match (&config.openai_api_key, &config.gemini_api_key) {
            (Some(key), _) => Provider::OpenAi {
                api_key: key.clone(),
            },
            (None, Some(key)) => Provider::Gemini {
                api_key: key.clone(),
            },
            (None, None) => Provider::Unconfigured,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Provider::OpenAi { .. } => "openai",
            Provider::Gemini { .. } => "gemini",
            Provider::Unconfigured => "unconfigured",
        }
    }
}

/// Shared HTTP client plus the provider endpoints. Cheap to clone.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    openai_base_url: String,
    gemini_base_url: String,
}

impl LlmClient {
    pub fn new(openai_base_url: &str, gemini_base_url: &str) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(HTTP_TIMEOUT).build()?,
            openai_base_url: openai_base_url.trim_end_matches('/').to_string(),
            gemini_base_url: gemini_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the backend for `provider`, or `None` when nothing is configured.
    pub fn text_provider(&self, provider: &Provider) -> Option<Box<dyn TextProvider>> {
        match provider {
            Provider::OpenAi { api_key } => Some(Box::new(OpenAiProvider::new(
                self.client.clone(),
                &self.openai_base_url,
                api_key.clone(),
            ))),
            Provider::Gemini { api_key } => Some(Box::new(GeminiProvider::new(
                self.client.clone(),
                &self.gemini_base_url,
                api_key.clone(),
            ))),
            Provider::Unconfigured => None,
        }
    }
}

/// Pulls a readable message out of a provider error body, falling back to the raw body.
/// Both OpenAI and Gemini use `{"error": {"message": ...}}`.
pub(crate) fn error_message(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(openai: Option<&str>, gemini: Option<&str>) -> Config {
        let mut config = Config::from_lookup(|_| None).unwrap();
        config.openai_api_key = openai.map(str::to_string);
        config.gemini_api_key = gemini.map(str::to_string);
        config
    }

    #[test]
    fn test_openai_preferred_when_both_keys_set() {
        let provider = Provider::from_config(&config_with(Some("sk-a"), Some("g-b")));
        assert_eq!(
            provider,
            Provider::OpenAi {
                api_key: "sk-a".to_string()
            }
        );
    }

    #[test]
    fn test_gemini_used_when_only_gemini_set() {
        let provider = Provider::from_config(&config_with(None, Some("g-b")));
        assert_eq!(provider.label(), "gemini");
    }

    #[test]
    fn test_unconfigured_yields_no_backend() {
        let provider = Provider::from_config(&config_with(None, None));
        assert_eq!(provider, Provider::Unconfigured);

        let llm = LlmClient::new("http://localhost:1", "http://localhost:2").unwrap();
        assert!(llm.text_provider(&provider).is_none());
    }

    #[test]
    fn test_backend_names_match_provider() {
        let llm = LlmClient::new("http://localhost:1", "http://localhost:2").unwrap();
        let openai = llm
            .text_provider(&Provider::OpenAi {
                api_key: "k".to_string(),
            })
            .unwrap();
        let gemini = llm
            .text_provider(&Provider::Gemini {
                api_key: "k".to_string(),
            })
            .unwrap();
        assert_eq!(openai.name(), "OpenAI");
        assert_eq!(gemini.name(), "Gemini");
    }

    #[test]
    fn test_error_message_extracts_nested_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(error_message(body.to_string()), "Incorrect API key provided");
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("upstream down".to_string()), "upstream down");
    }
}
