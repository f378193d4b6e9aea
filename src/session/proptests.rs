//! Property-based tests for the session state machine
//!
//! Drive random event sequences through `transition` and check the invariants
//! hold after every step, whether the event was accepted or refused.

use super::*;
use crate::answer::Answer;
use crate::gateway::FailureReason;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use std::collections::HashSet;

/// Abstract step; concrete ids are assigned while replaying
#[derive(Debug, Clone)]
enum Step {
    Submit(String),
    Answer(String),
    Fail(bool),
    /// Resolution for a turn that is not the pending one
    Stale,
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[a-zA-Z ]{1,20}",
        "\\PC{0,30}",
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => arb_text().prop_map(Step::Submit),
        2 => "[a-z *]{0,30}".prop_map(Step::Answer),
        1 => any::<bool>().prop_map(Step::Fail),
        1 => Just(Step::Stale),
    ]
}

/// Replay steps, minting unique ids, and yield every intermediate state
fn replay(steps: &[Step]) -> Vec<(SessionState, Result<Vec<Effect>, TransitionError>)> {
    let mut state = SessionState::default();
    let mut counter = 0u32;
    let mut next_id = || {
        counter += 1;
        MessageId::new(format!("m{counter}"))
    };
    let at = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
    let mut trace = Vec::new();

    for step in steps {
        let turn = state
            .pending()
            .map_or_else(|| MessageId::new("none"), |m| m.id.clone());
        let event = match step {
            Step::Submit(text) => Event::Submit {
                text: text.clone(),
                user_message_id: next_id(),
                placeholder_id: next_id(),
                at,
            },
            Step::Answer(text) => Event::AnswerReceived {
                turn,
                answer: Answer::text(text.clone()),
                message_id: next_id(),
                at,
            },
            Step::Fail(timeout) => Event::AnswerFailed {
                turn,
                reason: if *timeout {
                    FailureReason::Timeout { deadline_ms: 30_000 }
                } else {
                    FailureReason::Upstream {
                        details: "boom".to_string(),
                    }
                },
                message_id: next_id(),
                at,
            },
            Step::Stale => Event::AnswerReceived {
                turn: MessageId::new("stale"),
                answer: Answer::text("late"),
                message_id: next_id(),
                at,
            },
        };

        match transition(&state, event) {
            Ok(result) => {
                state = result.new_state;
                trace.push((state.clone(), Ok(result.effects)));
            }
            Err(e) => trace.push((state.clone(), Err(e))),
        }
    }
    trace
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_at_most_one_pending(steps in proptest::collection::vec(arb_step(), 0..40)) {
        for (state, _) in replay(&steps) {
            prop_assert!(state.is_consistent(), "inconsistent state: {:?}", state);
        }
    }

    #[test]
    fn prop_ids_unique(steps in proptest::collection::vec(arb_step(), 0..40)) {
        for (state, _) in replay(&steps) {
            let ids: HashSet<_> = state
                .messages
                .iter()
                .map(|m| &m.id)
                .chain(&state.retired_ids)
                .collect();
            prop_assert_eq!(ids.len(), state.messages.len() + state.retired_ids.len());
        }
    }

    #[test]
    fn prop_settled_history_is_append_only(steps in proptest::collection::vec(arb_step(), 0..40)) {
        let mut previous: Vec<Message> = vec![];
        for (state, _) in replay(&steps) {
            let settled: Vec<Message> = state.settled_messages().cloned().collect();
            prop_assert!(settled.len() >= previous.len());
            prop_assert_eq!(&settled[..previous.len()], &previous[..]);
            previous = settled;
        }
    }

    #[test]
    fn prop_submit_while_awaiting_is_busy(steps in proptest::collection::vec(arb_step(), 1..40)) {
        let trace = replay(&steps);
        let mut before = SessionState::default();
        for (step, (state, outcome)) in steps.iter().zip(trace) {
            if matches!(step, Step::Submit(_)) && before.awaiting_response {
                prop_assert_eq!(outcome, Err(TransitionError::Busy));
                prop_assert_eq!(state.messages.len(), before.messages.len());
            }
            before = state;
        }
    }

    #[test]
    fn prop_every_accepted_submit_dispatches_once(steps in proptest::collection::vec(arb_step(), 0..40)) {
        for (state, outcome) in replay(&steps) {
            if let Ok(effects) = outcome {
                let dispatches = effects
                    .iter()
                    .filter(|e| matches!(e, Effect::Dispatch { .. }))
                    .count();
                prop_assert!(dispatches <= 1);
                if dispatches == 1 {
                    prop_assert!(state.awaiting_response);
                }
                prop_assert!(effects.contains(&Effect::PublishSnapshot));
            }
        }
    }

    #[test]
    fn prop_last_error_tracks_last_resolution(steps in proptest::collection::vec(arb_step(), 0..40)) {
        for (state, outcome) in replay(&steps) {
            if outcome.is_ok() && !state.awaiting_response {
                let last = state.messages.last();
                let apologized = last.is_some_and(|m| m.content == APOLOGY_TEXT);
                // An answer text can never equal the apology: generated answers are [a-z *]
                prop_assert_eq!(state.last_error.is_some(), apologized);
            }
        }
    }
}
