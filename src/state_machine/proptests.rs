//! Property-based tests for the state machine
//!
//! Drive arbitrary event sequences through `transition` and a reference
//! reducer for the effects, checking the controller invariants after every
//! step.

use super::*;
use crate::error_surface::ErrorSurface;
use crate::timeline::{MessageEntry, Sender, Timeline};
use proptest::prelude::*;

// ============================================================================
// Reference model
// ============================================================================

/// Applies effects the way the runtime does, minus the I/O
#[derive(Default)]
struct Model {
    phase: Phase,
    timeline: Timeline,
    banner: ErrorSurface,
    requests: Vec<String>,
}

impl Model {
    fn step(&mut self, event: Event) -> Result<(), TransitionError> {
        let result = transition(&self.phase, event)?;
        for effect in result.effects {
            match effect {
                Effect::ClearBanner => self.banner.clear(),
                Effect::AppendMessage(entry) => {
                    self.timeline.append(entry);
                }
                Effect::RequestReply { query } => self.requests.push(query),
                Effect::ShowBanner(message) => self.banner.set(message),
            }
        }
        self.phase = result.new_state;
        Ok(())
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t\n\r]{0,8}"
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-zA-Z0-9?!]{1,4}[a-zA-Z0-9 ?!]{0,20}",
        1 => arb_blank(),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        3 => arb_text().prop_map(Event::submit),
        2 => "[a-zA-Z ]{0,30}".prop_map(Event::reply_received),
        1 => "[a-z ]{1,20}".prop_map(Event::reply_failed),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Whitespace-only submissions never change anything, in any phase
    #[test]
    fn prop_blank_submit_is_noop(
        prefix in proptest::collection::vec(arb_event(), 0..10),
        blank in arb_blank(),
    ) {
        let mut model = Model::default();
        for event in prefix {
            let _ = model.step(event);
        }
        let phase = model.phase.clone();
        let len = model.timeline.len();
        let banner = model.banner.current().map(str::to_string);

        prop_assert_eq!(model.step(Event::submit(blank)), Err(TransitionError::EmptyMessage));
        prop_assert_eq!(&model.phase, &phase);
        prop_assert_eq!(model.timeline.len(), len);
        prop_assert_eq!(model.banner.current().map(str::to_string), banner);
    }

    /// Any submission while a reply is pending is dropped
    #[test]
    fn prop_submit_while_sending_is_noop(first in "[a-z]{1,10}", second in arb_text()) {
        let mut model = Model::default();
        model.step(Event::submit(first)).unwrap();
        let len = model.timeline.len();

        prop_assert!(model.step(Event::submit(second)).is_err());
        prop_assert_eq!(&model.phase, &Phase::Sending);
        prop_assert_eq!(model.timeline.len(), len);
        prop_assert_eq!(model.requests.len(), 1);
    }

    /// Across any sequence: append-only, user entry directly followed by its
    /// reply, busy exactly while a request is outstanding, banner lifecycle.
    #[test]
    fn prop_invariants_hold_for_any_sequence(
        events in proptest::collection::vec(arb_event(), 0..40),
    ) {
        let mut model = Model::default();
        let mut previous: Vec<MessageEntry> = Vec::new();

        for event in events {
            let was_failure = matches!(event, Event::ReplyFailed { .. });
            let accepted = model.step(event).is_ok();
            let snapshot = model.timeline.snapshot();

            // Append-only: everything seen before is still there, unchanged
            prop_assert!(snapshot.len() >= previous.len());
            prop_assert_eq!(&snapshot[..previous.len()], previous.as_slice());
            prop_assert!(snapshot.len() - previous.len() <= 1);

            // Busy tracks outstanding requests
            let replies = snapshot.iter().filter(|e| e.sender == Sender::Assistant).count();
            let users = snapshot.iter().filter(|e| e.sender == Sender::User).count();
            prop_assert_eq!(model.requests.len(), users);
            prop_assert_eq!(model.phase.is_busy(), users > replies);

            // Banner only right after an accepted failure, or left over from one
            if accepted && was_failure {
                prop_assert_eq!(model.banner.current(), Some(BANNER_TEXT));
            }
            if model.phase.is_busy() {
                prop_assert_eq!(model.banner.current(), None);
            }

            previous = snapshot.to_vec();
        }

        // Strict alternation: user, assistant, user, assistant...
        for (i, entry) in model.timeline.snapshot().iter().enumerate() {
            let expected = if i % 2 == 0 { Sender::User } else { Sender::Assistant };
            prop_assert_eq!(entry.sender, expected);
        }
    }

    /// Error entries are exactly the ones produced by failures
    #[test]
    fn prop_error_flag_matches_failures(
        outcomes in proptest::collection::vec(any::<bool>(), 1..15),
    ) {
        let mut model = Model::default();
        for (i, ok) in outcomes.iter().enumerate() {
            model.step(Event::submit(format!("q{i}"))).unwrap();
            let reply = if *ok { Event::reply_received("fine") } else { Event::reply_failed("down") };
            model.step(reply).unwrap();
        }

        let flagged: Vec<bool> = model
            .timeline
            .snapshot()
            .iter()
            .skip(1)
            .step_by(2)
            .map(|e| e.is_error)
            .collect();
        let expected: Vec<bool> = outcomes.iter().map(|ok| !ok).collect();
        prop_assert_eq!(flagged, expected);
        prop_assert_eq!(model.banner.current().is_some(), !outcomes[outcomes.len() - 1]);
    }
}
