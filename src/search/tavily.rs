//! Tavily search provider

use super::{status_error, SearchError, WebSearch};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

/// Uses Tavily's synthesized `answer` as context
pub struct TavilySearch {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl TavilySearch {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            endpoint: TAVILY_ENDPOINT.to_string(),
        }
    }

    /// Point at a different endpoint (proxies, tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl WebSearch for TavilySearch {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&TavilyRequest {
                query,
                search_depth: "basic",
                include_answer: true,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: TavilyResponse = response.json().await?;
        tracing::debug!(has_answer = body.answer.is_some(), "Tavily search completed");
        Ok(body.answer.unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "Tavily"
    }
}

// Tavily API types

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    search_depth: &'a str,
    include_answer: bool,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    answer: Option<String>,
}
