//! Prompt assembly for the askbridge service.
//!
//! This crate turns a list of retrieved hits into the system instruction
//! sent to the completion backend:
//! - Field lookup per collection via an immutable [`FieldMap`]
//! - Context block concatenation in backend order
//! - Handlebars rendering of the fixed instruction template

pub mod builder;
pub mod fields;

// Re-export main types
pub use builder::{build_context, build_prompt, NO_CONTEXT_PROMPT};
pub use fields::{FieldMap, DEFAULT_SOURCE_FIELD};
