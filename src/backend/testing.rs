//! Mock implementations for testing
//!
//! These mocks let controller tests drive completions without real I/O.

use super::{AskBackend, BackendError};
use crate::api::AskResponse;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Notify;

// ============================================================================
// Mock Backend
// ============================================================================

/// Mock backend that returns queued results immediately
pub struct MockBackend {
    results: Mutex<VecDeque<Result<AskResponse, BackendError>>>,
    /// Record of all prompts asked
    pub prompts: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, text: impl Into<String>) {
        self.results.lock().unwrap().push_back(Ok(AskResponse {
            response: text.into(),
        }));
    }

    /// Queue a failure
    pub fn queue_error(&self, error: BackendError) {
        self.results.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_result(&self, prompt: &str) -> Result<AskResponse, BackendError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::network("No mock reply queued")))
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AskBackend for MockBackend {
    async fn ask(&self, prompt: &str) -> Result<AskResponse, BackendError> {
        self.next_result(prompt)
    }

    fn describe(&self) -> &str {
        "mock"
    }
}

// ============================================================================
// Gated Mock Backend (holds each call until released)
// ============================================================================

/// Mock backend whose calls block until the test calls `release`
pub struct GatedMockBackend {
    inner: MockBackend,
    gate: Notify,
}

impl GatedMockBackend {
    pub fn new() -> Self {
        Self {
            inner: MockBackend::new(),
            gate: Notify::new(),
        }
    }

    pub fn queue_reply(&self, text: impl Into<String>) {
        self.inner.queue_reply(text);
    }

    /// Let one pending (or the next) call complete
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn recorded_prompts(&self) -> Vec<String> {
        self.inner.recorded_prompts()
    }
}

impl Default for GatedMockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AskBackend for GatedMockBackend {
    async fn ask(&self, prompt: &str) -> Result<AskResponse, BackendError> {
        self.inner.prompts.lock().unwrap().push(prompt.to_string());
        self.gate.notified().await;
        self.inner
            .results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::network("No mock reply queued")))
    }

    fn describe(&self) -> &str {
        "gated-mock"
    }
}

// ============================================================================
// Misbehaving backends
// ============================================================================

/// Backend that never completes
pub struct PendingBackend;

#[async_trait]
impl AskBackend for PendingBackend {
    async fn ask(&self, _prompt: &str) -> Result<AskResponse, BackendError> {
        std::future::pending().await
    }

    fn describe(&self) -> &str {
        "pending"
    }
}

/// Backend that panics mid-call
pub struct PanickingBackend;

#[async_trait]
impl AskBackend for PanickingBackend {
    async fn ask(&self, _prompt: &str) -> Result<AskResponse, BackendError> {
        panic!("backend exploded")
    }

    fn describe(&self) -> &str {
        "panicking"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend() {
        let mock = MockBackend::new();
        mock.queue_reply("Hello");

        let reply = mock.ask("hi").await.unwrap();
        assert_eq!(reply.response, "Hello");

        // Second call should fail (nothing queued)
        assert!(mock.ask("hi again").await.is_err());
        assert_eq!(mock.recorded_prompts(), vec!["hi", "hi again"]);
    }
}
