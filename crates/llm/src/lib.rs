//! LLM completion crate for the askbridge service.
//!
//! This crate provides the generation stage of the answer pipeline: a
//! single chat completion against a hosted model, built from a system
//! instruction and the user's question. Providers sit behind the
//! `CompletionClient` trait so tests can substitute fakes.
//!
//! # Providers
//! - **OpenAI**: hosted chat-completions API (default)
//!
//! # Example
//! ```no_run
//! use askbridge_llm::{CompletionClient, CompletionRequest, providers::OpenAiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new("sk-...")?;
//! let request = CompletionRequest::new("gpt-3.5-turbo", "You answer questions.", "Hello!");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{CompletionClient, CompletionRequest, CompletionResponse, TokenUsage};
pub use factory::create_client;
pub use providers::OpenAiClient;
