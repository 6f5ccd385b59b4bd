//! Conversation state types

use serde::{Deserialize, Serialize};

/// Conversation state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConvState {
    /// Ready for user input, no request in flight
    #[default]
    Idle,

    /// One request is in flight; new prompts are refused until it completes
    AwaitingReply,
}

impl ConvState {
    /// Check if a reply is outstanding
    pub fn is_awaiting_reply(self) -> bool {
        matches!(self, ConvState::AwaitingReply)
    }

    /// Name used in logs and client notifications
    pub fn name(self) -> &'static str {
        match self {
            ConvState::Idle => "idle",
            ConvState::AwaitingReply => "awaiting_reply",
        }
    }
}
