//! Events that can occur in a conversation

use crate::backend::BackendErrorKind;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    Submit {
        prompt: String,
    },

    // Backend events
    ReplyReceived {
        text: String,
    },
    ReplyFailed {
        message: String,
        error_kind: BackendErrorKind,
    },
}
