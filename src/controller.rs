//! Conversation controller
//!
//! Owns the transcript and the idle/awaiting-reply state, and reconciles the
//! single in-flight ask call back into the transcript. All state changes go
//! through the pure `transition` function; this type only executes effects.
//!
//! Rejected submissions (blank prompt, or a reply still outstanding) are
//! dropped silently: nothing is appended, nothing changes, no call is made.
//! Backend failures never reach the caller of `submit`; they become the
//! `BACKEND_ERROR_TEXT` agent entry.
//!
//! There is no timeout and no cancellation here. If the backend never
//! completes, the conversation stays in `AwaitingReply`.
//!
//! The ask call runs on the Tokio runtime the controller was built on, or
//! the caller's runtime if it was built outside one. With neither, a prompt
//! is dropped before anything is committed.

use crate::backend::{AskBackend, BackendError};
use crate::state_machine::{transition, ConvState, Effect, Event};
use crate::transcript::{Entry, Transcript};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Notifications for presentation layers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    EntryAppended(Entry),
    StateChanged(ConvState),
}

/// Transcript and state read together
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSnapshot {
    pub entries: Vec<Entry>,
    pub awaiting_reply: bool,
}

/// Drives one conversation against one backend
pub struct ConversationController<B>
where
    B: AskBackend + 'static,
{
    shared: Arc<Shared>,
    backend: Arc<B>,
    runtime: Option<Handle>,
}

struct Shared {
    conversation: Mutex<Conversation>,
    events_tx: broadcast::Sender<ControllerEvent>,
}

#[derive(Default)]
struct Conversation {
    state: ConvState,
    transcript: Transcript,
}

impl<B> ConversationController<B>
where
    B: AskBackend + 'static,
{
    pub fn new(backend: B) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                conversation: Mutex::new(Conversation::default()),
                events_tx,
            }),
            backend: Arc::new(backend),
            runtime: Handle::try_current().ok(),
        }
    }

    /// Submit a prompt. Fire-and-forget; observe the outcome via reads or `subscribe`.
    pub fn submit(&self, prompt: &str) {
        let Some(runtime) = self
            .runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
        else {
            tracing::warn!("No Tokio runtime to run the ask call on, prompt dropped");
            return;
        };

        let deferred = self.shared.process_event(Event::Submit {
            prompt: prompt.to_string(),
        });

        for effect in deferred {
            match effect {
                Effect::RequestReply { prompt } => self.request_reply(&runtime, prompt),
                other => tracing::warn!(effect = ?other, "Unexpected deferred effect"),
            }
        }
    }

    /// Snapshot of the transcript in conversation order
    pub fn transcript(&self) -> Vec<Entry> {
        self.shared.lock().transcript.entries().to_vec()
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.shared.lock().state.is_awaiting_reply()
    }

    pub fn state(&self) -> ConvState {
        self.shared.lock().state
    }

    /// Transcript and busy flag under one lock
    pub fn snapshot(&self) -> ConversationSnapshot {
        let conversation = self.shared.lock();
        ConversationSnapshot {
            entries: conversation.transcript.entries().to_vec(),
            awaiting_reply: conversation.state.is_awaiting_reply(),
        }
    }

    /// Receive every appended entry and state change from now on
    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.shared.events_tx.subscribe()
    }

    /// Spawn the single outbound call; its completion is applied as one transition
    fn request_reply(&self, runtime: &Handle, prompt: String) {
        let backend = Arc::clone(&self.backend);
        let shared = Arc::clone(&self.shared);

        tracing::debug!(backend = backend.describe(), "Requesting reply");

        runtime.spawn(async move {
            // Run the call in its own task so a panicking backend still
            // produces a completion event.
            let call = tokio::spawn(async move { backend.ask(&prompt).await });

            let outcome = match call.await {
                Ok(result) => result,
                Err(e) => Err(BackendError::unknown(format!("Ask task failed: {e}"))),
            };

            let event = match outcome {
                Ok(reply) => Event::ReplyReceived {
                    text: reply.response,
                },
                Err(e) => {
                    tracing::debug!(kind = e.kind.as_str(), "Reply failed, appending sentinel");
                    Event::ReplyFailed {
                        message: e.message,
                        error_kind: e.kind,
                    }
                }
            };

            let deferred = shared.process_event(event);
            debug_assert!(deferred.is_empty(), "completion produced deferred effects");
        });
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Conversation> {
        self.conversation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply one event atomically. Returns effects that must run outside the lock.
    fn process_event(&self, event: Event) -> Vec<Effect> {
        let mut conversation = self.lock();

        let result = match transition(conversation.state, event) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(state = conversation.state.name(), reason = %e, "Event dropped");
                return Vec::new();
            }
        };

        let old_state = std::mem::replace(&mut conversation.state, result.new_state);
        let mut deferred = Vec::new();

        for effect in result.effects {
            match effect {
                Effect::AppendEntry { origin, text } => {
                    let entry = Entry::new(origin, text);
                    conversation.transcript.append(entry.clone());
                    // No subscribers is fine
                    let _ = self.events_tx.send(ControllerEvent::EntryAppended(entry));
                }
                Effect::NotifyStateChange => {
                    tracing::debug!(
                        from = old_state.name(),
                        to = conversation.state.name(),
                        entries = conversation.transcript.len(),
                        "State changed"
                    );
                    let _ = self
                        .events_tx
                        .send(ControllerEvent::StateChanged(conversation.state));
                }
                effect @ Effect::RequestReply { .. } => deferred.push(effect),
            }
        }

        deferred
    }
}
