//! Configuration from environment variables
//!
//! Both binaries load an optional `.env` file first, then read the process
//! environment. `from_lookup` takes any key lookup so tests don't touch the
//! real environment.

use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_MODEL: &str = "llama3.1:8b";
const DEFAULT_OLLAMA_BIN: &str = "ollama";
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/ask";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Which web search backs fresh-information prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchProvider {
    #[default]
    Tavily,
    Brave,
    /// Any unrecognized provider name: prompts are never augmented
    Disabled,
}

impl SearchProvider {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tavily" => Self::Tavily,
            "brave" => Self::Brave,
            _ => Self::Disabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub provider: SearchProvider,
    pub tavily_api_key: Option<String>,
    pub brave_api_key: Option<String>,
}

/// Settings for the `/ask` service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub allowed_origin: String,
    pub search: SearchConfig,
    pub model: String,
    pub ollama_bin: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_number(&lookup, "PARLEY_PORT")?.unwrap_or(DEFAULT_PORT);

        Ok(Self {
            port,
            allowed_origin: lookup("PARLEY_ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            search: SearchConfig {
                provider: lookup("SEARCH_PROVIDER")
                    .map(|p| SearchProvider::parse(&p))
                    .unwrap_or_default(),
                tavily_api_key: lookup("TAVILY_API_KEY"),
                brave_api_key: lookup("BRAVE_API_KEY"),
            },
            model: lookup("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            ollama_bin: lookup("OLLAMA_BIN").unwrap_or_else(|| DEFAULT_OLLAMA_BIN.to_string()),
        })
    }
}

/// Settings for a client driving a conversation over HTTP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub backend_url: String,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout_secs = parse_number(&lookup, "PARLEY_REQUEST_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(Self {
            backend_url: lookup("PARLEY_BACKEND_URL")
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
    }
}
