//! Shared handler state.
//!
//! All collaborators are constructed once at startup and injected here;
//! handlers hold no ambient globals and no mutable state.

use std::sync::Arc;

use askbridge_llm::CompletionClient;
use askbridge_prompt::FieldMap;
use askbridge_search::SearchBackend;

/// Read-only state shared by all requests.
pub struct AppState {
    /// Search backend for context retrieval
    pub search: Arc<dyn SearchBackend>,

    /// Completion backend for answer generation
    pub completion: Arc<dyn CompletionClient>,

    /// Collection-to-field mapping for context extraction
    pub fields: FieldMap,

    /// Completion model identifier, fixed per process
    pub model: String,
}

impl AppState {
    /// Create the shared state.
    pub fn new(
        search: Arc<dyn SearchBackend>,
        completion: Arc<dyn CompletionClient>,
        fields: FieldMap,
        model: impl Into<String>,
    ) -> Self {
        Self {
            search,
            completion,
            fields,
            model: model.into(),
        }
    }
}
