//! HTTP routes: the `/ask` answer endpoint and a liveness check.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use askbridge_llm::CompletionRequest;
use askbridge_prompt::{build_prompt, NO_CONTEXT_PROMPT};
use askbridge_search::TOP_HITS;

use crate::state::AppState;

/// Error message for a missing or empty question.
pub const NO_QUESTION_ERROR: &str = "No question provided";

/// Answer returned when the completion backend fails.
pub const COMPLETION_FALLBACK: &str = "Error generating response from OpenAI.";

/// Request body for `POST /ask`.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// The user's question; an absent field behaves as empty
    #[serde(default)]
    pub question: String,
}

/// Success body for `POST /ask`.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// The generated answer, or the fixed fallback text
    pub answer: String,
}

/// Error body for validation failures.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Build the axum router with `/ask` and `/health` routes.
///
/// Cross-origin requests are permitted from any origin; the core handler
/// logic below is origin-agnostic.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ask", post(ask_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Handler: POST /ask
///
/// Validates the question, then runs the pipeline in strict sequence:
/// search, prompt assembly, completion. Backend failures never reach the
/// caller as errors: retrieval degrades to an empty context and
/// completion degrades to a fixed fallback answer, each logged where the
/// decision is made. Only the validation failure produces a 400.
async fn ask_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, Json<ErrorResponse>)> {
    let question = body.question.trim();
    if question.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: NO_QUESTION_ERROR.to_string(),
            }),
        ));
    }

    tracing::info!("Answering question ({} chars)", question.len());

    let hits = match state.search.search(question, TOP_HITS).await {
        Ok(hits) => hits,
        Err(e) => {
            // An unreachable backend and a zero-result search look the
            // same from here on; callers only ever see missing context.
            tracing::warn!("Search failed, continuing without context: {}", e);
            Vec::new()
        }
    };

    tracing::debug!("Retrieved {} hits", hits.len());

    let prompt = match build_prompt(&hits, &state.fields) {
        Ok(prompt) => prompt,
        Err(e) => {
            tracing::warn!("Prompt assembly failed, using general-knowledge instruction: {}", e);
            NO_CONTEXT_PROMPT.to_string()
        }
    };

    let request = CompletionRequest::new(&state.model, prompt, question);

    let answer = match state.completion.complete(&request).await {
        Ok(response) => response.content,
        Err(e) => {
            tracing::warn!("Completion failed, returning fallback answer: {}", e);
            COMPLETION_FALLBACK.to_string()
        }
    };

    Ok(Json(AskResponse { answer }))
}

/// Liveness check.
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
