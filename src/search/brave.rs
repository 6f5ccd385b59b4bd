//! Brave search provider

use super::{status_error, SearchError, WebSearch};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;

const BRAVE_ENDPOINT: &str = "https://api.search.brave.com/res/v1/web/search";

/// Number of results folded into the context
const MAX_RESULTS: usize = 3;

/// Uses the top web results, one `title: description` line each
pub struct BraveSearch {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl BraveSearch {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            endpoint: BRAVE_ENDPOINT.to_string(),
        }
    }

    /// Point at a different endpoint (proxies, tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl WebSearch for BraveSearch {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;

        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header("X-Subscription-Token", api_key)
            .query(&[("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: BraveResponse = response.json().await?;
        let results = body.web.map(|w| w.results).unwrap_or_default();
        tracing::debug!(results = results.len(), "Brave search completed");

        Ok(results
            .iter()
            .take(MAX_RESULTS)
            .map(|r| format!("{}: {}", r.title, r.description))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn name(&self) -> &'static str {
        "Brave"
    }
}

// Brave API types

#[derive(Debug, Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWeb>,
}

#[derive(Debug, Deserialize)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveResult>,
}

#[derive(Debug, Deserialize)]
struct BraveResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}
