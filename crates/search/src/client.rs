//! Search backend abstraction and hit types.

use askbridge_core::AppResult;
use serde::{Deserialize, Serialize};

/// A single document returned by a search query.
///
/// Hits are request-scoped: they live in the result list for one request
/// and are discarded after prompt assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Collection (index) the document came from
    pub index: String,

    /// Relevance score assigned by the backend (unused beyond ranking)
    pub score: Option<f32>,

    /// The document's stored fields
    pub source: serde_json::Value,
}

impl SearchHit {
    /// Create a hit from a collection id and stored fields.
    pub fn new(index: impl Into<String>, source: serde_json::Value) -> Self {
        Self {
            index: index.into(),
            score: None,
            source,
        }
    }

    /// Extract the text of a stored field.
    ///
    /// Returns an empty string when the field is absent or not a string;
    /// a mismatched document schema degrades to an empty context fragment
    /// rather than an error.
    pub fn field_text(&self, field: &str) -> &str {
        self.source
            .get(field)
            .and_then(serde_json::Value::as_str)
            .unwrap_or("")
    }
}

/// Trait for search backends.
///
/// Abstracts the hosted search service behind an object-safe interface so
/// the request handler can be exercised against in-memory fakes.
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    /// Get the backend name (e.g., "elasticsearch").
    fn backend_name(&self) -> &str;

    /// Run a keyword query and return at most `limit` best-scoring hits.
    ///
    /// Any connectivity, authentication, or response-shape failure is
    /// returned as an error; the caller decides whether to degrade it to
    /// an empty result list.
    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<SearchHit>>;
}
