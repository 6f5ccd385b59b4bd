//! HTTP transport for the ask call

use super::{AskBackend, BackendError};
use crate::api::{AskRequest, AskResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Posts prompts as JSON to a `/ask` endpoint
pub struct HttpBackend {
    client: Client,
    url: String,
}

impl HttpBackend {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn classify_transport_error(e: &reqwest::Error) -> BackendError {
        if e.is_timeout() {
            BackendError::timeout(format!("Request timeout: {e}"))
        } else if e.is_connect() {
            BackendError::network(format!("Connection failed: {e}"))
        } else {
            BackendError::network(format!("Request failed: {e}"))
        }
    }
}

#[async_trait]
impl AskBackend for HttpBackend {
    async fn ask(&self, prompt: &str) -> Result<AskResponse, BackendError> {
        let response = self
            .client
            .post(&self.url)
            .json(&AskRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await
            .map_err(|e| Self::classify_transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::classify_transport_error(&e))?;

        if !status.is_success() {
            return Err(BackendError::status(format!("HTTP {status}: {body}")));
        }

        serde_json::from_str(&body).map_err(|e| {
            BackendError::decode(format!("Failed to parse response: {e} - body: {body}"))
        })
    }

    fn describe(&self) -> &str {
        &self.url
    }
}
