//! Completion provider factory.
//!
//! Creates completion clients from application configuration: resolves the
//! provider name, injects the API key, and returns a trait object the
//! request handler can hold.

use std::sync::Arc;

use askbridge_core::{AppError, AppResult};

use crate::client::CompletionClient;
use crate::providers::OpenAiClient;

/// Create a completion client for the named provider.
///
/// # Arguments
/// * `provider` - Provider identifier (currently "openai")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - API key for providers that require one
///
/// # Errors
/// Returns `AppError::Config` for unknown providers or a missing key.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn CompletionClient>> {
    match provider.to_lowercase().as_str() {
        "openai" => {
            let api_key = api_key
                .ok_or_else(|| AppError::Config("OpenAI provider requires an API key".to_string()))?;

            let client = match endpoint {
                Some(url) => OpenAiClient::with_base_url(api_key, url)?,
                None => OpenAiClient::new(api_key)?,
            };

            Ok(Arc::new(client))
        }
        _ => Err(AppError::Config(format!("Unknown provider: {}", provider))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_openai_client() {
        let client = create_client("openai", None, Some("fake-key"));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().provider_name(), "openai");
    }

    #[test]
    fn test_create_openai_with_custom_endpoint() {
        let client = create_client("openai", Some("http://localhost:8080"), Some("fake-key"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_openai_requires_api_key() {
        match create_client("openai", None, None) {
            Err(err) => assert!(err.to_string().contains("requires an API key")),
            Ok(_) => panic!("Expected error for OpenAI without API key"),
        }
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("parrot", None, Some("key")) {
            Err(err) => assert!(err.to_string().contains("Unknown provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
