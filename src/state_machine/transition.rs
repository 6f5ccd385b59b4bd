//! Pure state transition function
//!
//! Given the same state and event, `transition` always produces the same
//! new state and effects. All I/O happens in the controller that executes
//! the effects.

use super::{ConvState, Effect, Event};
use thiserror::Error;

/// Agent text appended when the outbound call fails for any reason.
/// Kept verbatim for compatibility with existing clients.
pub const BACKEND_ERROR_TEXT: &str = "[Error: Could not reach backend]";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
///
/// These are rejections, not faults: the controller drops the event and
/// leaves state and transcript untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Prompt is empty")]
    EmptyPrompt,
    #[error("Agent is busy, cannot accept prompt until the current reply arrives")]
    AwaitingReply,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
pub fn transition(state: ConvState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Prompt submission
        // ============================================================

        // Blank prompts are refused in every state
        (_, Event::Submit { prompt }) if prompt.trim().is_empty() => {
            Err(TransitionError::EmptyPrompt)
        }

        // Idle + Submit -> AwaitingReply
        (ConvState::Idle, Event::Submit { prompt }) => {
            let prompt = prompt.trim().to_string();
            Ok(TransitionResult::new(ConvState::AwaitingReply)
                .with_effect(Effect::append_user(prompt.clone()))
                .with_effect(Effect::NotifyStateChange)
                .with_effect(Effect::RequestReply { prompt }))
        }

        // At most one outbound call in flight
        (ConvState::AwaitingReply, Event::Submit { .. }) => Err(TransitionError::AwaitingReply),

        // ============================================================
        // Reply reconciliation
        // ============================================================

        (ConvState::AwaitingReply, Event::ReplyReceived { text }) => {
            Ok(TransitionResult::new(ConvState::Idle)
                .with_effect(Effect::append_agent(text))
                .with_effect(Effect::NotifyStateChange))
        }

        // Failures of every kind collapse into the same agent entry
        (ConvState::AwaitingReply, Event::ReplyFailed { .. }) => {
            Ok(TransitionResult::new(ConvState::Idle)
                .with_effect(Effect::append_agent(BACKEND_ERROR_TEXT))
                .with_effect(Effect::NotifyStateChange))
        }

        (ConvState::Idle, event @ (Event::ReplyReceived { .. } | Event::ReplyFailed { .. })) => {
            Err(TransitionError::InvalidTransition(format!(
                "{event:?} while idle"
            )))
        }
    }
}
