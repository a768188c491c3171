//! Search retrieval crate for the askbridge service.
//!
//! This crate provides the retrieval stage of the answer pipeline: a
//! keyword query against a single hosted collection, returning the top
//! ranked documents with their stored fields. The `SearchBackend` trait is
//! the seam the request handler depends on, so tests can substitute fakes
//! without any network access.

pub mod client;
pub mod elastic;

// Re-export main types
pub use client::{SearchBackend, SearchHit};
pub use elastic::{ElasticClient, TOP_HITS};
