use std::time::Instant;

use serde_json::{Value, json};

use crate::error::ApiError;
use crate::metrics::ENGINE_LATENCY;

/// Thin client for the external search engine. The engine's indexing model
/// and ranking are opaque here; its JSON responses are passed back to the
/// caller verbatim.
pub struct EsClient {
    http: reqwest::Client,
    search_url: String,
}

impl EsClient {
    pub fn new(http: reqwest::Client, base_url: &str, index: &str) -> Self {
        Self {
            http,
            search_url: format!("{}/{}/_search", base_url.trim_end_matches('/'), index),
        }
    }

    /// Full-text search over the corpus, paged and sorted by message date.
    pub async fn search(
        &self,
        query: &str,
        from: i64,
        size: i64,
        sort: &str,
    ) -> Result<Value, ApiError> {
        self.execute(json!({
            "from": from,
            "size": size,
            "query": {
                "query_string": {
                    "query": query,
                    "fields": ["subject", "body", "from", "to"]
                }
            },
            "sort": [{ "date": { "order": sort } }]
        }))
        .await
    }

    /// Pages through the whole corpus sorted by message date.
    pub async fn browse(&self, from: i64, size: i64, sort: &str) -> Result<Value, ApiError> {
        self.execute(json!({
            "from": from,
            "size": size,
            "query": { "match_all": {} },
            "sort": [{ "date": { "order": sort } }]
        }))
        .await
    }

    async fn execute(&self, body: Value) -> Result<Value, ApiError> {
        let start = Instant::now();
        let response = self.http.post(&self.search_url).json(&body).send().await?;
        let result = response.error_for_status()?.json::<Value>().await?;
        ENGINE_LATENCY.observe(start.elapsed().as_secs_f64());
        Ok(result)
    }
}
