//! Collection-to-field mapping for context extraction.

use std::collections::HashMap;

/// Field used when a collection has no explicit mapping.
///
/// The fallback applies even when the actual document schema differs, in
/// which case the extracted fragment is empty.
pub const DEFAULT_SOURCE_FIELD: &str = "body";

/// Immutable mapping from collection identifier to the field holding a
/// document's display text.
///
/// Constructed once at startup and passed into the prompt builder; the
/// builder itself carries no hidden table.
#[derive(Debug, Clone)]
pub struct FieldMap {
    fields: HashMap<String, String>,
}

impl FieldMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Add a collection-to-field entry.
    pub fn with_field(mut self, collection: impl Into<String>, field: impl Into<String>) -> Self {
        self.fields.insert(collection.into(), field.into());
        self
    }

    /// Look up the display field for a collection.
    ///
    /// Unrecognized collections fall back to [`DEFAULT_SOURCE_FIELD`].
    pub fn field_for(&self, collection: &str) -> &str {
        self.fields
            .get(collection)
            .map(String::as_str)
            .unwrap_or(DEFAULT_SOURCE_FIELD)
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the mapping has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FieldMap {
    /// The mapping the service ships with: the rotary support collection
    /// stores its display text under `body`.
    fn default() -> Self {
        Self::new().with_field("search-rotary", "body")
    }
}
