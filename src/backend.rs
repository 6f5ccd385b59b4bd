//! Remote collaborator abstraction
//!
//! The controller only knows how to `ask` a prompt and get a reply back.
//! Transports implement `AskBackend`; the HTTP one speaks the
//! `{"prompt"} -> {"response"}` wire shape.

mod error;
mod http;

#[cfg(test)]
pub mod testing;

pub use error::{BackendError, BackendErrorKind};
pub use http::HttpBackend;

use crate::api::AskResponse;
use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for the remote side of a conversation
#[async_trait]
pub trait AskBackend: Send + Sync {
    /// Send one prompt, wait for one reply
    async fn ask(&self, prompt: &str) -> Result<AskResponse, BackendError>;

    /// Short description for logs
    fn describe(&self) -> &str;
}

#[async_trait]
impl<T: AskBackend + ?Sized> AskBackend for Arc<T> {
    async fn ask(&self, prompt: &str) -> Result<AskResponse, BackendError> {
        (**self).ask(prompt).await
    }

    fn describe(&self) -> &str {
        (**self).describe()
    }
}

/// Logging wrapper for backends
pub struct LoggingBackend {
    inner: Arc<dyn AskBackend>,
    label: String,
}

impl LoggingBackend {
    pub fn new(inner: Arc<dyn AskBackend>) -> Self {
        let label = inner.describe().to_string();
        Self { inner, label }
    }
}

#[async_trait]
impl AskBackend for LoggingBackend {
    async fn ask(&self, prompt: &str) -> Result<AskResponse, BackendError> {
        let start = std::time::Instant::now();
        let result = self.inner.ask(prompt).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    backend = %self.label,
                    duration_ms = %duration.as_millis(),
                    prompt_chars = prompt.chars().count(),
                    reply_chars = reply.response.chars().count(),
                    "Ask completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    backend = %self.label,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = e.kind.as_str(),
                    "Ask failed"
                );
            }
        }

        result
    }

    fn describe(&self) -> &str {
        &self.label
    }
}
