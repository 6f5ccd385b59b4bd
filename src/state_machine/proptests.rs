//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::transition::*;
use super::*;
use crate::backend::BackendErrorKind;
use crate::transcript::Origin;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_error_kind() -> impl Strategy<Value = BackendErrorKind> {
    prop_oneof![
        Just(BackendErrorKind::Network),
        Just(BackendErrorKind::Timeout),
        Just(BackendErrorKind::Status),
        Just(BackendErrorKind::Decode),
        Just(BackendErrorKind::Unknown),
    ]
}

fn arb_state() -> impl Strategy<Value = ConvState> {
    prop_oneof![Just(ConvState::Idle), Just(ConvState::AwaitingReply)]
}

fn arb_blank_prompt() -> impl Strategy<Value = String> {
    "[ \t\n]{0,8}"
}

fn arb_submit_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        "[ ]{0,3}[a-zA-Z0-9?!]{1,20}[ ]{0,3}".prop_map(|prompt| Event::Submit { prompt }),
        arb_blank_prompt().prop_map(|prompt| Event::Submit { prompt }),
    ]
}

fn arb_reply_event() -> impl Strategy<Value = Event> {
    "[a-zA-Z ]{0,30}".prop_map(|text| Event::ReplyReceived { text })
}

fn arb_failure_event() -> impl Strategy<Value = Event> {
    ("[a-zA-Z ]{1,30}", arb_error_kind()).prop_map(|(message, error_kind)| Event::ReplyFailed {
        message,
        error_kind,
    })
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![arb_submit_event(), arb_reply_event(), arb_failure_event()]
}

// ============================================================================
// Model
// ============================================================================

/// Applies effects the way the controller does, without any I/O
#[derive(Default)]
struct Model {
    state: ConvState,
    entries: Vec<(Origin, String)>,
    requests: Vec<String>,
}

impl Model {
    fn apply(&mut self, event: Event) -> bool {
        match transition(self.state, event) {
            Ok(result) => {
                self.state = result.new_state;
                for effect in result.effects {
                    match effect {
                        Effect::AppendEntry { origin, text } => self.entries.push((origin, text)),
                        Effect::RequestReply { prompt } => self.requests.push(prompt),
                        Effect::NotifyStateChange => {}
                    }
                }
                true
            }
            Err(_) => false,
        }
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Blank prompts never change anything, whatever the state
    #[test]
    fn prop_blank_prompt_is_noop(state in arb_state(), prompt in arb_blank_prompt()) {
        let result = transition(state, Event::Submit { prompt });
        prop_assert_eq!(result.unwrap_err(), TransitionError::EmptyPrompt);
    }

    // Idle accepts any non-blank prompt, appends it trimmed, and asks once
    #[test]
    fn prop_idle_accepts_prompt(prompt in "[ ]{0,3}[a-zA-Z0-9]{1,20}[ ]{0,3}") {
        let result = transition(ConvState::Idle, Event::Submit { prompt: prompt.clone() }).unwrap();
        prop_assert_eq!(result.new_state, ConvState::AwaitingReply);

        let appended: Vec<Effect> = result
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::AppendEntry { .. }))
            .cloned()
            .collect();
        prop_assert_eq!(appended, vec![Effect::append_user(prompt.trim())]);

        let requests = result.effects.iter().filter(|e| e.is_deferred()).count();
        prop_assert_eq!(requests, 1);
    }

    // While awaiting, further prompts are refused
    #[test]
    fn prop_awaiting_rejects_prompts(event in arb_submit_event()) {
        prop_assert!(transition(ConvState::AwaitingReply, event).is_err());
    }

    // Any completion returns to Idle and appends exactly one agent entry
    #[test]
    fn prop_completion_returns_to_idle(event in prop_oneof![arb_reply_event(), arb_failure_event()]) {
        let result = transition(ConvState::AwaitingReply, event).unwrap();
        prop_assert_eq!(result.new_state, ConvState::Idle);

        let agent_entries = result
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::AppendEntry { origin: Origin::Agent, .. }))
            .count();
        prop_assert_eq!(agent_entries, 1);
        prop_assert!(!result.effects.iter().any(Effect::is_deferred));
    }

    // Failures always surface as the sentinel text
    #[test]
    fn prop_failure_text_is_sentinel(event in arb_failure_event()) {
        let result = transition(ConvState::AwaitingReply, event).unwrap();
        prop_assert_eq!(result.effects[0].clone(), Effect::append_agent(BACKEND_ERROR_TEXT));
    }

    // State changes always notify subscribers
    #[test]
    fn prop_state_changes_notify(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(state, event) {
            if result.new_state != state {
                prop_assert!(
                    result.effects.contains(&Effect::NotifyStateChange),
                    "State changed but no NotifyStateChange: {:?} -> {:?}",
                    state,
                    result.new_state
                );
            }
        }
    }

    // Over any event sequence: entries alternate User/Agent starting with User,
    // every request matches the user entry before it, and at most one
    // request is outstanding.
    #[test]
    fn prop_transcript_alternates(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut model = Model::default();

        for event in events {
            let requests_before = model.requests.len();
            let accepted = model.apply(event);
            if !accepted {
                prop_assert_eq!(model.requests.len(), requests_before);
            }

            let user_count = model.entries.iter().filter(|(o, _)| *o == Origin::User).count();
            let agent_count = model.entries.len() - user_count;
            let outstanding = user_count - agent_count;
            prop_assert!(outstanding <= 1);
            prop_assert_eq!(outstanding == 1, model.state.is_awaiting_reply());
            prop_assert_eq!(model.requests.len(), user_count);
        }

        for (i, (origin, _)) in model.entries.iter().enumerate() {
            let expected = if i % 2 == 0 { Origin::User } else { Origin::Agent };
            prop_assert_eq!(*origin, expected);
        }

        let user_texts: Vec<&String> = model
            .entries
            .iter()
            .filter(|(o, _)| *o == Origin::User)
            .map(|(_, t)| t)
            .collect();
        let requested: Vec<&String> = model.requests.iter().collect();
        prop_assert_eq!(user_texts, requested);
    }
}
