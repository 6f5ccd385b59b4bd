//! Answers prompts for the `/ask` service
//!
//! Flow: trim → optionally fetch web context → run the model → trim output.
//! Search and model failures never fail the request; they turn into
//! bracketed placeholder text the user can read.

use crate::model::ModelRunner;
use crate::search::{needs_search, WebSearch};
use std::sync::Arc;

/// Reply for a blank prompt
pub const EMPTY_PROMPT_REPLY: &str = "Empty prompt.";

pub struct Responder {
    search: Option<Arc<dyn WebSearch>>,
    model: Arc<dyn ModelRunner>,
}

impl Responder {
    pub fn new(search: Option<Arc<dyn WebSearch>>, model: Arc<dyn ModelRunner>) -> Self {
        Self { search, model }
    }

    pub async fn answer(&self, prompt: &str) -> String {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return EMPTY_PROMPT_REPLY.to_string();
        }

        let full_prompt = if needs_search(prompt) {
            let context = self.web_context(prompt).await;
            augment_prompt(&context, prompt)
        } else {
            prompt.to_string()
        };

        let output = match self.model.run(&full_prompt).await {
            Ok(output) => output,
            Err(e) => {
                tracing::error!(model = self.model.name(), error = %e, "Model run failed");
                format!("[{} error: {e}]", self.model.name())
            }
        };

        output.trim().to_string()
    }

    async fn web_context(&self, query: &str) -> String {
        let Some(search) = &self.search else {
            return String::new();
        };

        match search.search(query).await {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(provider = search.name(), error = %e, "Web search failed");
                format!("[{} search error: {e}]", search.name())
            }
        }
    }
}

/// Prefix the prompt with web context
pub fn augment_prompt(context: &str, prompt: &str) -> String {
    format!("Use this web info:\n{context}\n\nThen answer this:\n{prompt}")
}
