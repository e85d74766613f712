//! Intake session state, deltas, and the phase machine.
//!
//! `IntakeState` is the single source of truth for one session. It is
//! persisted verbatim between rounds, so the orchestrator holds no state of
//! its own and resumption after a restart is a plain load. Controllers never
//! mutate state directly; they return an `IntakeDelta` that the orchestrator
//! applies as an additive merge.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Named states of the intake machine, derived from persisted state.
///
/// Deriving the phase instead of storing it keeps the persisted form free of
/// redundancy: a reloaded `IntakeState` is always in a consistent phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakePhase {
    /// Questions are being gathered; the next step is a question round.
    Collecting,
    /// Suspended pending answers from the caller.
    AwaitingAnswers,
    /// Enough information gathered; the next step is finalization.
    ReadyToFinalize,
    /// Finalization succeeded; terminal.
    Done,
    /// An error was recorded; absorbing, no further transitions.
    Failed,
}

impl IntakePhase {
    /// Returns true for the terminal phases.
    pub fn is_terminal(&self) -> bool {
        matches!(self, IntakePhase::Done | IntakePhase::Failed)
    }
}

/// Accumulated state of one intake session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeState {
    /// Set once at session creation; immutable thereafter.
    pub initial_description: String,
    /// Cumulative, append-only across rounds.
    pub questions: Vec<String>,
    /// Cumulative, append-only; `answers.len() <= questions.len()` except
    /// momentarily mid-round.
    pub answers: Vec<String>,
    /// Incremented exactly once per question-generation round.
    pub iteration_count: u32,
    /// True once enough information has been gathered or the ceiling hit.
    pub is_ready: bool,
    /// True only after finalization succeeds; terminal marker.
    pub is_complete: bool,
    /// Set exactly once by finalization; never overwritten.
    pub final_description: Option<String>,
    /// Set by either controller on failure; halts the machine.
    pub error: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl IntakeState {
    /// Creates a fresh session state around an initial description.
    ///
    /// An empty description is accepted; the question round is expected to
    /// compensate with broad questions.
    pub fn new(initial_description: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            initial_description: initial_description.into(),
            questions: Vec::new(),
            answers: Vec::new(),
            iteration_count: 0,
            is_ready: false,
            is_complete: false,
            final_description: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Derives the current phase of the intake machine.
    pub fn phase(&self) -> IntakePhase {
        if self.error.is_some() {
            IntakePhase::Failed
        } else if self.is_complete {
            IntakePhase::Done
        } else if self.is_ready {
            IntakePhase::ReadyToFinalize
        } else if self.questions.len() > self.answers.len() {
            IntakePhase::AwaitingAnswers
        } else {
            IntakePhase::Collecting
        }
    }

    /// Number of questions currently without an answer.
    pub fn outstanding_questions(&self) -> usize {
        self.questions.len().saturating_sub(self.answers.len())
    }

    /// Ordered (question, answer) pairs, positionally aligned and truncated
    /// to the shorter of the two lists.
    pub fn qa_pairs(&self) -> Vec<(&str, &str)> {
        self.questions
            .iter()
            .zip(self.answers.iter())
            .map(|(q, a)| (q.as_str(), a.as_str()))
            .collect()
    }

    /// Appends caller-supplied answers to the cumulative list.
    pub fn append_answers<I, S>(&mut self, answers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answers.extend(answers.into_iter().map(Into::into));
        self.updated_at = Timestamp::now();
    }

    /// Applies a controller delta as an additive merge.
    ///
    /// Questions are appended, never replaced. `final_description` is set at
    /// most once. An empty delta leaves the state untouched.
    pub fn apply(&mut self, delta: IntakeDelta) {
        if delta.is_empty() {
            return;
        }

        self.questions.extend(delta.questions);
        if let Some(count) = delta.iteration_count {
            self.iteration_count = count;
        }
        if let Some(ready) = delta.is_ready {
            self.is_ready = ready;
        }
        if let Some(complete) = delta.is_complete {
            self.is_complete = complete;
        }
        if self.final_description.is_none() {
            if let Some(text) = delta.final_description {
                self.final_description = Some(text);
            }
        }
        if self.error.is_none() {
            self.error = delta.error;
        }
        self.updated_at = Timestamp::now();
    }
}

/// A controller's proposed change to an `IntakeState`.
///
/// Cumulative fields (`questions`) merge additively; scalar fields only take
/// effect when present. Controllers produce deltas, the orchestrator applies
/// them, and only after a successful external call, so an interrupted round
/// leaves the persisted state unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeDelta {
    /// New questions to append.
    pub questions: Vec<String>,
    pub iteration_count: Option<u32>,
    pub is_ready: Option<bool>,
    pub is_complete: Option<bool>,
    pub final_description: Option<String>,
    pub error: Option<String>,
}

impl IntakeDelta {
    /// The idempotent no-op delta.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a delta carrying only an error.
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Sets the iteration count.
    pub fn with_iteration_count(mut self, count: u32) -> Self {
        self.iteration_count = Some(count);
        self
    }

    /// Returns true if applying this delta would change nothing.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
            && self.iteration_count.is_none()
            && self.is_ready.is_none()
            && self.is_complete.is_none()
            && self.final_description.is_none()
            && self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answered_state(questions: &[&str], answers: &[&str]) -> IntakeState {
        let mut state = IntakeState::new("I want to apply for a divorce");
        state.questions = questions.iter().map(|s| s.to_string()).collect();
        state.answers = answers.iter().map(|s| s.to_string()).collect();
        state
    }

    #[test]
    fn new_state_starts_collecting() {
        let state = IntakeState::new("I was assaulted");
        assert_eq!(state.phase(), IntakePhase::Collecting);
        assert_eq!(state.iteration_count, 0);
        assert!(state.questions.is_empty());
        assert!(state.answers.is_empty());
    }

    #[test]
    fn empty_description_is_accepted() {
        let state = IntakeState::new("");
        assert_eq!(state.phase(), IntakePhase::Collecting);
    }

    #[test]
    fn unanswered_questions_mean_awaiting_answers() {
        let state = answered_state(&["Where do you reside?"], &[]);
        assert_eq!(state.phase(), IntakePhase::AwaitingAnswers);
        assert_eq!(state.outstanding_questions(), 1);
    }

    #[test]
    fn answered_questions_mean_collecting() {
        let state = answered_state(&["Where do you reside?"], &["Dubai"]);
        assert_eq!(state.phase(), IntakePhase::Collecting);
        assert_eq!(state.outstanding_questions(), 0);
    }

    #[test]
    fn ready_flag_wins_over_outstanding_questions() {
        let mut state = answered_state(&["Q1", "Q2"], &["A1"]);
        state.is_ready = true;
        assert_eq!(state.phase(), IntakePhase::ReadyToFinalize);
    }

    #[test]
    fn complete_flag_means_done() {
        let mut state = answered_state(&["Q1"], &["A1"]);
        state.is_complete = true;
        state.final_description = Some("Case summary".to_string());
        assert_eq!(state.phase(), IntakePhase::Done);
        assert!(state.phase().is_terminal());
    }

    #[test]
    fn error_wins_over_everything() {
        let mut state = answered_state(&["Q1"], &[]);
        state.is_ready = true;
        state.is_complete = true;
        state.error = Some("question generation failed: timeout".to_string());
        assert_eq!(state.phase(), IntakePhase::Failed);
        assert!(state.phase().is_terminal());
    }

    #[test]
    fn apply_appends_questions_without_replacing() {
        let mut state = answered_state(&["Q1"], &["A1"]);
        state.apply(IntakeDelta {
            questions: vec!["Q2".to_string(), "Q3".to_string()],
            iteration_count: Some(2),
            is_ready: Some(false),
            ..Default::default()
        });

        assert_eq!(state.questions, vec!["Q1", "Q2", "Q3"]);
        assert_eq!(state.iteration_count, 2);
    }

    #[test]
    fn apply_empty_delta_is_noop() {
        let mut state = answered_state(&["Q1"], &["A1"]);
        let before = state.clone();
        state.apply(IntakeDelta::empty());
        assert_eq!(state, before);
    }

    #[test]
    fn apply_sets_final_description_at_most_once() {
        let mut state = IntakeState::new("desc");
        state.apply(IntakeDelta {
            final_description: Some("First".to_string()),
            is_complete: Some(true),
            ..Default::default()
        });
        state.apply(IntakeDelta {
            final_description: Some("Second".to_string()),
            ..Default::default()
        });

        assert_eq!(state.final_description.as_deref(), Some("First"));
    }

    #[test]
    fn apply_keeps_first_error() {
        let mut state = IntakeState::new("desc");
        state.apply(IntakeDelta::from_error("first failure"));
        state.apply(IntakeDelta::from_error("second failure"));
        assert_eq!(state.error.as_deref(), Some("first failure"));
    }

    #[test]
    fn qa_pairs_align_to_shorter_list() {
        let state = answered_state(&["Q1", "Q2", "Q3"], &["A1", "A2"]);
        let pairs = state.qa_pairs();
        assert_eq!(pairs, vec![("Q1", "A1"), ("Q2", "A2")]);
    }

    #[test]
    fn append_answers_extends_cumulatively() {
        let mut state = answered_state(&["Q1", "Q2"], &[]);
        state.append_answers(["A1"]);
        state.append_answers(["A2"]);
        assert_eq!(state.answers, vec!["A1", "A2"]);
    }

    #[test]
    fn state_roundtrips_through_json() {
        let mut state = answered_state(&["Q1"], &["A1"]);
        state.iteration_count = 2;
        state.is_ready = true;

        let json = serde_json::to_string(&state).unwrap();
        let back: IntakeState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_delta() -> impl Strategy<Value = IntakeDelta> {
            (
                proptest::collection::vec("[a-z ?]{0,20}", 0..4),
                proptest::option::of(0u32..10),
                proptest::option::of(any::<bool>()),
                proptest::option::of(any::<bool>()),
                proptest::option::of("[a-z .]{0,30}"),
                proptest::option::of("[a-z :]{0,30}"),
            )
                .prop_map(
                    |(questions, iteration_count, is_ready, is_complete, final_description, error)| {
                        IntakeDelta {
                            questions,
                            iteration_count,
                            is_ready,
                            is_complete,
                            final_description,
                            error,
                        }
                    },
                )
        }

        proptest! {
            #[test]
            fn apply_never_removes_or_reorders_questions(deltas in proptest::collection::vec(arb_delta(), 1..8)) {
                let mut state = IntakeState::new("desc");
                for delta in deltas {
                    let before = state.questions.clone();
                    state.apply(delta);
                    prop_assert!(state.questions.len() >= before.len());
                    prop_assert_eq!(&state.questions[..before.len()], &before[..]);
                }
            }

            #[test]
            fn final_description_set_at_most_once(deltas in proptest::collection::vec(arb_delta(), 1..8)) {
                let mut state = IntakeState::new("desc");
                let mut first: Option<String> = None;
                for delta in deltas {
                    state.apply(delta);
                    if first.is_none() {
                        first = state.final_description.clone();
                    }
                }
                if let Some(text) = first {
                    prop_assert_eq!(state.final_description, Some(text));
                }
            }

            #[test]
            fn initial_description_is_immutable(deltas in proptest::collection::vec(arb_delta(), 1..8)) {
                let mut state = IntakeState::new("original description");
                for delta in deltas {
                    state.apply(delta);
                }
                prop_assert_eq!(state.initial_description, "original description");
            }
        }
    }
}
