//! Effects produced by state transitions

use crate::transcript::Origin;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append an entry to the transcript
    AppendEntry { origin: Origin, text: String },

    /// Issue the single outbound call for this prompt
    RequestReply { prompt: String },

    /// Tell subscribers the state changed
    NotifyStateChange,
}

impl Effect {
    pub fn append_user(text: impl Into<String>) -> Self {
        Effect::AppendEntry {
            origin: Origin::User,
            text: text.into(),
        }
    }

    pub fn append_agent(text: impl Into<String>) -> Self {
        Effect::AppendEntry {
            origin: Origin::Agent,
            text: text.into(),
        }
    }

    /// True if this effect must run off the caller's path (it awaits I/O)
    pub fn is_deferred(&self) -> bool {
        matches!(self, Effect::RequestReply { .. })
    }
}
