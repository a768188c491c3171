//! Configuration management for the askbridge service.
//!
//! Configuration is environment-first: the two backend API keys are
//! required secrets and the process refuses to start without them, while
//! everything else falls back to a sensible default. CLI flags are merged
//! on top via [`AppConfig::with_overrides`].

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Default search backend endpoint (hosted Elasticsearch deployment).
pub const DEFAULT_SEARCH_ENDPOINT: &str =
    "https://paypal-checkout-ffcafb.es.us-east-1.aws.elastic.cloud:443";

/// Default collection queried for context.
pub const DEFAULT_COLLECTION: &str = "search-rotary";

/// Default completion model identifier.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Interface the HTTP server binds to
    pub host: String,

    /// Port the HTTP server listens on
    pub port: u16,

    /// Search backend settings
    pub search: SearchConfig,

    /// Completion backend settings
    pub completion: CompletionConfig,

    /// Log filter override
    pub log_level: Option<String>,

    /// Disable colored log output
    pub no_color: bool,
}

/// Search backend (Elasticsearch) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the search deployment
    pub endpoint: String,

    /// API key, sent as `Authorization: ApiKey <key>`
    pub api_key: String,

    /// Collection (index) name queried for context
    pub collection: String,
}

/// Completion backend (OpenAI) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// API key, sent as a Bearer token
    pub api_key: String,

    /// Model identifier, fixed per process
    pub model: String,

    /// Optional endpoint override (defaults to the hosted API)
    pub endpoint: Option<String>,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ES_API_KEY`: search backend API key (**required**)
    /// - `OPENAI_API_KEY`: completion backend API key (**required**)
    /// - `ES_URL`: search backend endpoint
    /// - `ES_COLLECTION`: collection name
    /// - `OPENAI_MODEL`: completion model identifier
    /// - `OPENAI_URL`: completion endpoint override
    /// - `ASKBRIDGE_HOST` / `ASKBRIDGE_PORT`: bind address
    /// - `RUST_LOG`: log filter
    /// - `NO_COLOR`: disable colored output
    ///
    /// # Errors
    /// Returns `AppError::Config` when a required secret is missing or a
    /// value fails to parse. Startup must not proceed past this.
    pub fn load() -> AppResult<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// `load` delegates here with a `std::env::var` lookup; tests pass a
    /// closure over a map so they never mutate process environment.
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let search_key = require_secret(&lookup, "ES_API_KEY")?;
        let completion_key = require_secret(&lookup, "OPENAI_API_KEY")?;

        let port = match lookup("ASKBRIDGE_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("Invalid ASKBRIDGE_PORT '{}': {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup("ASKBRIDGE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            search: SearchConfig {
                endpoint: lookup("ES_URL").unwrap_or_else(|| DEFAULT_SEARCH_ENDPOINT.to_string()),
                api_key: search_key,
                collection: lookup("ES_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            },
            completion: CompletionConfig {
                api_key: completion_key,
                model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                endpoint: lookup("OPENAI_URL"),
            },
            log_level: lookup("RUST_LOG"),
            no_color: lookup("NO_COLOR").is_some(),
        })
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over environment variables.
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        log_level: Option<String>,
        no_color: bool,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }

        if let Some(port) = port {
            self.port = port;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// The address the server binds to, as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Look up a required secret, treating empty values as missing.
fn require_secret(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> AppResult<String> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Config(format!(
            "{} is not set. Both ES_API_KEY and OPENAI_API_KEY are required to start.",
            key
        ))),
    }
}
