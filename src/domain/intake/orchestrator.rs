//! Intake Orchestrator.
//!
//! Drives the intake state machine until it suspends (`AwaitingAnswers`) or
//! terminates (`Done`/`Failed`). The orchestrator holds no session state of
//! its own: it is handed an `IntakeState`, applies controller deltas to it,
//! and returns the phase it stopped in. Persistence is the caller's job,
//! which keeps resumption after a restart a plain load-and-advance.
//!
//! # Design
//!
//! Each loop turn dispatches on the derived phase:
//! - `Collecting` runs a question round.
//! - `ReadyToFinalize` runs finalization.
//! - Everything else is a stop: `AwaitingAnswers` suspends the session until
//!   the caller supplies answers; `Done` and `Failed` are terminal.
//!
//! Failures from either controller arrive as error deltas, so the loop falls
//! out through the `Failed` phase rather than an `Err` path. The round
//! ceiling bounds the number of port calls a single `advance` can make.

use std::sync::Arc;

use tracing::info;

use crate::ports::TextGenerator;

use super::finalizer::FinalizationController;
use super::question_round::QuestionRoundController;
use super::state::{IntakePhase, IntakeState};

/// Coordinates the question-round and finalization controllers over one
/// session's state.
pub struct IntakeOrchestrator {
    question_round: QuestionRoundController,
    finalizer: FinalizationController,
}

impl IntakeOrchestrator {
    /// Wires both controllers around a shared text generator.
    pub fn new(generator: Arc<dyn TextGenerator>, max_rounds: u32, temperature: f32) -> Self {
        Self {
            question_round: QuestionRoundController::new(
                Arc::clone(&generator),
                max_rounds,
                temperature,
            ),
            finalizer: FinalizationController::new(generator),
        }
    }

    /// Advances the state machine until it suspends or terminates.
    ///
    /// Safe to call in any phase: terminal and suspended sessions are
    /// returned untouched, which makes repeated calls idempotent.
    pub async fn advance(&self, state: &mut IntakeState) -> IntakePhase {
        loop {
            match state.phase() {
                IntakePhase::Collecting => {
                    let delta = self.question_round.generate_round(state).await;
                    state.apply(delta);
                }
                IntakePhase::ReadyToFinalize => {
                    let delta = self.finalizer.finalize(state).await;
                    state.apply(delta);
                }
                phase => {
                    info!(
                        phase = ?phase,
                        iteration = state.iteration_count,
                        outstanding = state.outstanding_questions(),
                        "intake advance stopped"
                    );
                    return phase;
                }
            }
        }
    }
}
