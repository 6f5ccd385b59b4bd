//! Web search used to ground answers about recent events
//!
//! `needs_search` decides whether a prompt gets web context at all; the
//! configured provider fetches it.

mod brave;
mod tavily;

pub use brave::BraveSearch;
pub use tavily::TavilySearch;

use crate::config::{SearchConfig, SearchProvider};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Words that suggest the answer depends on fresh information
const FRESHNESS_KEYWORDS: &[&str] = &[
    "latest",
    "today",
    "current",
    "news",
    "trending",
    "who won",
    "real-time",
];

/// Explicit opt-in prefix
const SEARCH_PREFIX: &str = "search:";

const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Search failure; never fails the enclosing request
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("missing API key")]
    MissingApiKey,
}

/// A web search provider returning plain-text context
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<String, SearchError>;

    /// Display name, used in error placeholders
    fn name(&self) -> &'static str;
}

/// Check if a prompt should be augmented with web results
pub fn needs_search(prompt: &str) -> bool {
    let lower = prompt.to_lowercase();
    let result = FRESHNESS_KEYWORDS.iter().any(|k| lower.contains(k))
        || lower.starts_with(SEARCH_PREFIX);
    tracing::debug!(needs_search = result, "Search heuristic evaluated");
    result
}

/// Build the configured provider, if any
pub fn build_search(config: &SearchConfig) -> Result<Option<Arc<dyn WebSearch>>, SearchError> {
    let client = reqwest::Client::builder().timeout(SEARCH_TIMEOUT).build()?;

    let provider: Option<Arc<dyn WebSearch>> = match config.provider {
        SearchProvider::Tavily => Some(Arc::new(TavilySearch::new(
            client,
            config.tavily_api_key.clone(),
        ))),
        SearchProvider::Brave => Some(Arc::new(BraveSearch::new(
            client,
            config.brave_api_key.clone(),
        ))),
        SearchProvider::Disabled => None,
    };

    Ok(provider)
}

/// Read the body of a failed response into an error
async fn status_error(response: reqwest::Response) -> SearchError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    SearchError::Status { status, body }
}
