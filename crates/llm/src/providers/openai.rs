//! OpenAI completion provider implementation.
//!
//! Speaks the chat-completions API with Bearer authentication.
//! API: https://platform.openai.com/docs/api-reference/chat

use std::time::Duration;

use askbridge_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::client::{CompletionClient, CompletionRequest, CompletionResponse, TokenUsage};

/// Hosted API base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Timeout applied to every outbound completion call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Chat-completions API request format.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat-completions API response format (the parts we read).
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: String,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

/// OpenAI completion client.
pub struct OpenAiClient {
    /// API key for Bearer authentication
    api_key: String,

    /// Base URL for the API
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a new client against the hosted API.
    pub fn new(api_key: impl Into<String>) -> AppResult<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a new client with a custom base URL.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Completion(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client,
        })
    }

    /// Convert a `CompletionRequest` to the wire format.
    ///
    /// Always exactly two messages: system first, then user.
    fn to_chat_request(&self, request: &CompletionRequest) -> ChatRequest {
        ChatRequest {
            model: request.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user.clone(),
                },
            ],
        }
    }

    /// Convert a wire response to a `CompletionResponse`.
    fn convert_response(response: ChatResponse) -> AppResult<CompletionResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Completion("Response contained no choices".to_string()))?;

        let usage = response
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            model: response.model,
            usage,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl CompletionClient for OpenAiClient {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> AppResult<CompletionResponse> {
        tracing::debug!("Sending completion request for model {}", request.model);

        let chat_request = self.to_chat_request(request);

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| AppError::Completion(format!("Failed to send completion request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Completion(format!(
                "Completion API error ({}): {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Completion(format!("Failed to parse completion response: {}", e)))?;

        tracing::debug!("Received completion from OpenAI");

        Self::convert_response(chat_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> OpenAiClient {
        OpenAiClient::new("fake-key").unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = test_client();
        assert_eq!(client.provider_name(), "openai");
        assert_eq!(
            client.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_conversion_role_order() {
        let client = test_client();
        let request = CompletionRequest::new("gpt-3.5-turbo", "instructions", "question");

        let chat = client.to_chat_request(&request);
        assert_eq!(chat.model, "gpt-3.5-turbo");
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].role, "system");
        assert_eq!(chat.messages[0].content, "instructions");
        assert_eq!(chat.messages[1].role, "user");
        assert_eq!(chat.messages[1].content, "question");
    }

    #[test]
    fn test_response_conversion() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "model": "gpt-3.5-turbo-0125",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Replace the seal."}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 80, "completion_tokens": 12, "total_tokens": 92}
        }"#;

        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let response = OpenAiClient::convert_response(parsed).unwrap();

        assert_eq!(response.content, "Replace the seal.");
        assert_eq!(response.model, "gpt-3.5-turbo-0125");
        assert_eq!(response.usage.total_tokens, 92);
    }

    #[test]
    fn test_response_without_choices_is_error() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"model": "gpt-3.5-turbo", "choices": []}"#).unwrap();
        let result = OpenAiClient::convert_response(parsed);
        assert!(result.is_err());
    }

    #[test]
    fn test_null_content_degrades_to_empty() {
        let raw = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let response = OpenAiClient::convert_response(parsed).unwrap();
        assert_eq!(response.content, "");
    }

    #[test]
    fn test_custom_base_url_trims_trailing_slash() {
        let client = OpenAiClient::with_base_url("k", "http://localhost:8080/").unwrap();
        assert_eq!(
            client.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }
}
