//! Parley - a small conversational request-orchestration core
//!
//! `ConversationController` owns one conversation: an append-only
//! transcript plus an idle/awaiting-reply state machine that allows at most
//! one outbound ask call at a time. The `/ask` service it talks to lives in
//! `api`, built from `responder`, `search` and `model`.

pub mod api;
pub mod backend;
pub mod config;
pub mod controller;
pub mod model;
pub mod responder;
pub mod search;
pub mod state_machine;
pub mod transcript;

pub use backend::{AskBackend, BackendError, BackendErrorKind, HttpBackend, LoggingBackend};
pub use controller::{ControllerEvent, ConversationController, ConversationSnapshot};
pub use state_machine::{ConvState, BACKEND_ERROR_TEXT};
pub use transcript::{Entry, Origin, Transcript};
