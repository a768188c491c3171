//! Prompt builder: context concatenation and template rendering.

use std::collections::HashMap;

use askbridge_core::{AppError, AppResult};
use askbridge_search::SearchHit;
use handlebars::Handlebars;

use crate::fields::FieldMap;

/// Instruction sent when retrieval produced no context.
///
/// Returned verbatim, independent of the question text.
pub const NO_CONTEXT_PROMPT: &str =
    "No relevant data found. Answer based on general knowledge.";

/// Instruction template wrapped around the retrieved context.
const ANSWER_TEMPLATE: &str = "\
Instructions:
- You are an assistant for answering questions.
- Answer based only on the given context. If unsure, say \"I don't know.\"
- Cite sources using inline citations [].
- Use markdown for code.

Context:
{{context}}
";

/// Concatenate the display text of each hit into a context block.
///
/// For every hit the display field is resolved through `fields` (with the
/// `body` fallback for unrecognized collections) and the extracted value
/// is appended followed by a newline. Hits keep the order the backend
/// returned them in; nothing is re-sorted or deduplicated.
pub fn build_context(hits: &[SearchHit], fields: &FieldMap) -> String {
    let mut context = String::new();

    for hit in hits {
        let field = fields.field_for(&hit.index);
        context.push_str(hit.field_text(field));
        context.push('\n');
    }

    context
}

/// Build the system instruction for a list of retrieved hits.
///
/// An empty hit list yields [`NO_CONTEXT_PROMPT`]; otherwise the context
/// block is rendered into the fixed instruction template. Deterministic
/// for identical hits and field mapping.
pub fn build_prompt(hits: &[SearchHit], fields: &FieldMap) -> AppResult<String> {
    if hits.is_empty() {
        tracing::debug!("No hits retrieved, using general-knowledge instruction");
        return Ok(NO_CONTEXT_PROMPT.to_string());
    }

    let context = build_context(hits, fields);

    let mut variables = HashMap::new();
    variables.insert("context".to_string(), context);

    render_template(ANSWER_TEMPLATE, &variables)
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // The context is plain text, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
