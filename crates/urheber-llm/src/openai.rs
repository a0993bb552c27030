//! OpenAI Provider Implementation
//!
//! Talks to the OpenAI Responses API (`POST {endpoint}/responses`).
//!
//! # Features
//!
//! - Blocking HTTP client, safe to call from worker threads
//! - Web retrieval through the hosted `web_search` tool
//! - JSON-constrained output through `text.format = json_object`
//! - Configurable endpoint, model and request timeout
//!
//! The provider does not retry. A failed call surfaces immediately.
//!
//! # Examples
//!
//! ```no_run
//! use urheber_llm::{OpenAiConfig, OpenAiProvider};
//!
//! // Reads the API key from OPENAI_API_KEY
//! let provider = OpenAiProvider::new(OpenAiConfig::default()).unwrap();
//! ```

use crate::LlmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use urheber_domain::traits::{LlmProvider as LlmProviderTrait, LlmRequest, ResponseFormat};

/// Default OpenAI API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default timeout for LLM requests (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for the OpenAI provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API base URL
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,

    /// Request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl OpenAiConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// OpenAI Responses API provider
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

/// Request body for the Responses API
#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<TextOptions>,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct TextOptions {
    format: TextFormat,
}

#[derive(Debug, Serialize)]
struct TextFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Response from the Responses API
#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesResponse {
    /// Concatenated text of all assistant message parts
    fn output_text(&self) -> String {
        self.output
            .iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| item.content.iter())
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}

impl OpenAiProvider {
    /// Create a provider, reading the API key from `config.api_key_env`
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            LlmError::Config(format!(
                "environment variable {} is not set",
                config.api_key_env
            ))
        })?;
        Self::with_api_key(config, api_key)
    }

    /// Create a provider with an explicit API key
    pub fn with_api_key(config: OpenAiConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Config)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model,
            api_key: api_key.into(),
            client,
        })
    }

    /// Model used for requests
    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body<'a>(&'a self, request: &'a LlmRequest) -> ResponsesRequest<'a> {
        let tools = if request.web_search {
            vec![Tool { kind: "web_search" }]
        } else {
            Vec::new()
        };

        let text = match request.format {
            ResponseFormat::Json => Some(TextOptions {
                format: TextFormat { kind: "json_object" },
            }),
            ResponseFormat::Text => None,
        };

        ResponsesRequest {
            model: &self.model,
            input: &request.prompt,
            instructions: request.instructions.as_deref(),
            tools,
            text,
        }
    }
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    fn generate(&self, request: &LlmRequest) -> Result<String, Self::Error> {
        let url = format!("{}/responses", self.endpoint);

        debug!(
            "Sending request to {} (model {}, web_search {}, prompt {} chars)",
            url,
            self.model,
            request.web_search,
            request.prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(request))
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: ResponsesResponse = response
            .json()
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let text = body.output_text();
        if text.trim().is_empty() {
            return Err(LlmError::InvalidResponse(
                "Response contained no output text".to_string(),
            ));
        }

        debug!("Received {} chars of output", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> OpenAiProvider {
        OpenAiProvider::with_api_key(OpenAiConfig::default(), "sk-test").unwrap()
    }

    #[test]
    fn test_provider_creation() {
        let provider = provider();
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_endpoint_trailing_slash_is_trimmed() {
        let config = OpenAiConfig {
            endpoint: "http://localhost:8080/v1/".to_string(),
            ..OpenAiConfig::default()
        };
        let provider = OpenAiProvider::with_api_key(config, "sk-test").unwrap();
        assert_eq!(provider.endpoint, "http://localhost:8080/v1");
    }

    #[test]
    fn test_missing_api_key_env() {
        let config = OpenAiConfig {
            api_key_env: "URHEBER_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..OpenAiConfig::default()
        };
        let result = OpenAiProvider::new(config);
        assert!(matches!(result, Err(LlmError::Config(_))));
    }

    #[test]
    fn test_invalid_config() {
        let config = OpenAiConfig {
            timeout_secs: 0,
            ..OpenAiConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(OpenAiProvider::with_api_key(config, "sk-test").is_err());
    }

    #[test]
    fn test_config_from_toml_uses_defaults() {
        let config: OpenAiConfig = toml::from_str("model = \"gpt-4o-mini\"").unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_request_body_for_search() {
        let provider = provider();
        let request = LlmRequest::new("Wer betreibt example.org?")
            .with_instructions("factual only")
            .with_web_search();

        let body = serde_json::to_value(provider.request_body(&request)).unwrap();
        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["input"], "Wer betreibt example.org?");
        assert_eq!(body["instructions"], "factual only");
        assert_eq!(body["tools"][0]["type"], "web_search");
        assert!(body.get("text").is_none());
    }

    #[test]
    fn test_request_body_for_json() {
        let provider = provider();
        let request = LlmRequest::new("Antworte im JSON-Format").json();

        let body = serde_json::to_value(provider.request_body(&request)).unwrap();
        assert_eq!(body["text"]["format"]["type"], "json_object");
        assert!(body.get("tools").is_none());
        assert!(body.get("instructions").is_none());
    }

    #[test]
    fn test_output_text_skips_tool_calls() {
        let body: ResponsesResponse = serde_json::from_str(
            r#"{
                "output": [
                    {"type": "web_search_call", "id": "ws_1", "status": "completed"},
                    {"type": "message", "role": "assistant", "content": [
                        {"type": "output_text", "text": "{\"urheber\": ", "annotations": []},
                        {"type": "output_text", "text": "\"staatlich\"}"}
                    ]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(body.output_text(), r#"{"urheber": "staatlich"}"#);
    }

    #[test]
    fn test_error_handling() {
        // Use invalid endpoint to trigger error
        let config = OpenAiConfig {
            endpoint: "http://localhost:99999".to_string(),
            timeout_secs: 2,
            ..OpenAiConfig::default()
        };
        let provider = OpenAiProvider::with_api_key(config, "sk-test").unwrap();

        let result = provider.generate(&LlmRequest::new("test"));
        match result {
            Err(LlmError::Communication(_)) => {} // Expected
            other => panic!("Expected Communication error, got {:?}", other),
        }
    }

    // Integration test (requires network and OPENAI_API_KEY)
    #[test]
    #[ignore]
    fn test_generate_integration() {
        let provider = OpenAiProvider::new(OpenAiConfig::default()).unwrap();
        let result = provider.generate(&LlmRequest::new("Say 'hello' and nothing else"));
        assert!(!result.unwrap().is_empty());
    }
}
