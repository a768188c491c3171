//! Elasticsearch search backend implementation.
//!
//! Speaks the `_search` REST API of a hosted Elasticsearch deployment,
//! authenticated with an API key.
//! API: https://www.elastic.co/guide/en/elasticsearch/reference/current/search-search.html

use std::time::Duration;

use askbridge_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::client::{SearchBackend, SearchHit};

/// Number of top-ranked hits requested per query.
pub const TOP_HITS: usize = 3;

/// Field the keyword query matches against.
const QUERY_FIELD: &str = "title";

/// Timeout applied to every outbound search call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Elasticsearch `_search` request body.
#[derive(Debug, Serialize)]
struct SearchRequest {
    query: QueryClause,
    size: usize,
}

#[derive(Debug, Serialize)]
struct QueryClause {
    multi_match: MultiMatch,
}

#[derive(Debug, Serialize)]
struct MultiMatch {
    query: String,
    fields: Vec<String>,
}

/// Elasticsearch `_search` response body (the parts we read).
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize, Default)]
struct HitsEnvelope {
    #[serde(default)]
    hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_index")]
    index: String,
    #[serde(rename = "_score")]
    score: Option<f32>,
    #[serde(rename = "_source", default)]
    source: serde_json::Value,
}

/// Search client for a hosted Elasticsearch collection.
pub struct ElasticClient {
    /// Base URL of the deployment
    endpoint: String,

    /// Collection (index) name queried
    collection: String,

    /// API key for the `Authorization: ApiKey` scheme
    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl ElasticClient {
    /// Create a new client for one collection of one deployment.
    pub fn new(
        endpoint: impl Into<String>,
        collection: impl Into<String>,
        api_key: impl Into<String>,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Search(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            collection: collection.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// The collection this client queries.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Build the `_search` request body for a query string.
    fn to_search_request(&self, query: &str, limit: usize) -> SearchRequest {
        SearchRequest {
            query: QueryClause {
                multi_match: MultiMatch {
                    query: query.to_string(),
                    fields: vec![QUERY_FIELD.to_string()],
                },
            },
            size: limit,
        }
    }

    fn search_url(&self) -> String {
        format!(
            "{}/{}/_search",
            self.endpoint.trim_end_matches('/'),
            self.collection
        )
    }

    /// Convert a raw response hit into a `SearchHit`.
    fn convert_hit(raw: RawHit) -> SearchHit {
        SearchHit {
            index: raw.index,
            score: raw.score,
            source: raw.source,
        }
    }
}

#[async_trait::async_trait]
impl SearchBackend for ElasticClient {
    fn backend_name(&self) -> &str {
        "elasticsearch"
    }

    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<SearchHit>> {
        tracing::debug!("Searching '{}' for: {}", self.collection, query);

        let body = self.to_search_request(query, limit);

        let response = self
            .client
            .post(self.search_url())
            .header("Authorization", format!("ApiKey {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Search(format!("Failed to send search request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Search(format!(
                "Search API error ({}): {}",
                status, error_text
            )));
        }

        let search_response: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Failed to parse search response: {}", e)))?;

        let hits: Vec<SearchHit> = search_response
            .hits
            .hits
            .into_iter()
            .map(Self::convert_hit)
            .collect();

        tracing::debug!("Search returned {} hits", hits.len());

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> ElasticClient {
        ElasticClient::new("https://search.example.com:443", "search-rotary", "fake-key").unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = test_client();
        assert_eq!(client.backend_name(), "elasticsearch");
        assert_eq!(client.collection(), "search-rotary");
    }

    #[test]
    fn test_search_request_body() {
        let client = test_client();
        let body = client.to_search_request("rotary seal", TOP_HITS);

        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({
                "query": {
                    "multi_match": {
                        "query": "rotary seal",
                        "fields": ["title"]
                    }
                },
                "size": 3
            })
        );
    }

    #[test]
    fn test_search_url_trims_trailing_slash() {
        let client =
            ElasticClient::new("https://search.example.com/", "search-rotary", "k").unwrap();
        assert_eq!(
            client.search_url(),
            "https://search.example.com/search-rotary/_search"
        );
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{
            "took": 2,
            "hits": {
                "total": {"value": 2, "relation": "eq"},
                "hits": [
                    {
                        "_index": "search-rotary",
                        "_id": "1",
                        "_score": 2.1,
                        "_source": {"title": "Seal replacement", "body": "Step 1: remove housing."}
                    },
                    {
                        "_index": "search-rotary",
                        "_id": "2",
                        "_score": 1.4,
                        "_source": {"title": "Seal installation", "body": "Step 2: install new seal."}
                    }
                ]
            }
        }"#;

        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        let hits: Vec<SearchHit> = parsed.hits.hits.into_iter().map(ElasticClient::convert_hit).collect();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].index, "search-rotary");
        assert_eq!(hits[0].score, Some(2.1));
        assert_eq!(hits[0].field_text("body"), "Step 1: remove housing.");
        assert_eq!(hits[1].field_text("body"), "Step 2: install new seal.");
    }

    #[test]
    fn test_response_parsing_empty() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"took": 1}"#).unwrap();
        assert!(parsed.hits.hits.is_empty());
    }
}
