//! Finalization Controller.
//!
//! Produces the final case description exactly once per session, from the
//! initial description plus the accumulated question/answer pairs. Requires
//! the session to be ready; calling it earlier is a programming-contract
//! violation, not a recoverable runtime condition.

use std::sync::Arc;

use tracing::{info, warn};

use crate::ports::{GenerationRequest, TextGenerator};

use super::prompts;
use super::state::{IntakeDelta, IntakeState};

/// Controller for the one-shot finalization step.
pub struct FinalizationController {
    generator: Arc<dyn TextGenerator>,
}

impl FinalizationController {
    /// Creates a finalization controller.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Synthesizes the final case description.
    ///
    /// On success the readiness flag is cleared (it has been consumed) and
    /// the session is marked complete. On provider failure the session stays
    /// incomplete; re-invoking once readiness is re-confirmed is safe
    /// because no cumulative state is consumed destructively.
    pub async fn finalize(&self, state: &IntakeState) -> IntakeDelta {
        if !state.is_ready {
            return IntakeDelta::from_error("finalize called without readiness");
        }

        let request = GenerationRequest::new(prompts::finalize_prompt(state));

        match self.generator.generate(request).await {
            Ok(response) => {
                info!(
                    questions = state.questions.len(),
                    answers = state.answers.len(),
                    "final case description generated"
                );
                IntakeDelta {
                    final_description: Some(response.content),
                    is_complete: Some(true),
                    is_ready: Some(false),
                    ..Default::default()
                }
            }
            Err(e) => {
                warn!(error = %e, "finalization failed");
                IntakeDelta::from_error(format!("finalization failed: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockError, MockTextGenerator};
    use crate::domain::intake::IntakePhase;

    fn ready_state() -> IntakeState {
        let mut state = IntakeState::new("I want to apply for a divorce");
        state.questions = vec!["Where do you reside?".to_string(), "Any children?".to_string()];
        state.answers = vec!["Dubai".to_string(), "Two".to_string()];
        state.iteration_count = 2;
        state.is_ready = true;
        state
    }

    #[tokio::test]
    async fn finalize_produces_description_and_completes() {
        let generator = MockTextGenerator::new().with_response("Case summary: divorce filing.");
        let state = ready_state();

        let delta = FinalizationController::new(Arc::new(generator))
            .finalize(&state)
            .await;

        assert_eq!(
            delta.final_description.as_deref(),
            Some("Case summary: divorce filing.")
        );
        assert_eq!(delta.is_complete, Some(true));
        assert_eq!(delta.is_ready, Some(false));
        assert!(delta.error.is_none());
    }

    #[tokio::test]
    async fn finalize_applied_reaches_done() {
        let generator = MockTextGenerator::new().with_response("Case summary: ...");
        let mut state = ready_state();

        let delta = FinalizationController::new(Arc::new(generator))
            .finalize(&state)
            .await;
        state.apply(delta);

        assert_eq!(state.phase(), IntakePhase::Done);
        assert!(!state.is_ready);
    }

    #[tokio::test]
    async fn finalize_without_readiness_is_contract_violation() {
        let generator = MockTextGenerator::new();
        let calls = generator.clone();
        let state = IntakeState::new("desc");

        let delta = FinalizationController::new(Arc::new(generator))
            .finalize(&state)
            .await;

        assert_eq!(
            delta.error.as_deref(),
            Some("finalize called without readiness")
        );
        assert!(delta.final_description.is_none());
        assert_eq!(calls.call_count(), 0);
    }

    #[tokio::test]
    async fn finalize_failure_leaves_session_retryable() {
        let generator = MockTextGenerator::new().with_error(MockError::Unavailable {
            message: "overloaded".to_string(),
        });
        let state = ready_state();

        let delta = FinalizationController::new(Arc::new(generator))
            .finalize(&state)
            .await;

        assert!(delta.is_complete.is_none());
        assert!(delta.final_description.is_none());
        let error = delta.error.unwrap();
        assert!(error.starts_with("finalization failed:"));
        assert!(error.contains("overloaded"));
    }

    #[tokio::test]
    async fn finalize_uses_free_text_generation() {
        let generator = MockTextGenerator::new().with_response("summary");
        let calls = generator.clone();
        let state = ready_state();

        FinalizationController::new(Arc::new(generator))
            .finalize(&state)
            .await;

        let requests = calls.get_calls();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].response_schema.is_none());
        assert!(requests[0].prompt.contains("- Q: Where do you reside?"));
        assert!(requests[0].prompt.contains("  A: Dubai"));
    }
}
