//! Caller-facing snapshot of an intake session.

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::intake::{IntakePhase, IntakeState};

/// Read model returned by every intake use case.
///
/// A plain projection of the persisted state; no behavior, no surprises.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeView {
    pub session_id: SessionId,
    pub phase: IntakePhase,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub iteration_count: u32,
    pub is_ready: bool,
    pub is_complete: bool,
    pub final_description: Option<String>,
    pub error: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl IntakeView {
    /// Projects a session state into its view.
    pub fn from_state(session_id: SessionId, state: &IntakeState) -> Self {
        Self {
            session_id,
            phase: state.phase(),
            questions: state.questions.clone(),
            answers: state.answers.clone(),
            iteration_count: state.iteration_count,
            is_ready: state.is_ready,
            is_complete: state.is_complete,
            final_description: state.final_description.clone(),
            error: state.error.clone(),
            created_at: state.created_at,
            updated_at: state.updated_at,
        }
    }

    /// Questions the caller still has to answer, in order.
    pub fn outstanding_questions(&self) -> &[String] {
        &self.questions[self.answers.len().min(self.questions.len())..]
    }
}
