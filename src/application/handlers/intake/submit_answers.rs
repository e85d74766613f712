//! SubmitAnswersHandler - Command handler for resuming a suspended session.

use std::sync::Arc;

use tracing::info;

use crate::application::session_locks::SessionLocks;
use crate::domain::foundation::SessionId;
use crate::domain::intake::{IntakeError, IntakeOrchestrator};
use crate::ports::SessionStore;

use super::view::IntakeView;

/// Command to submit answers for a session's outstanding questions.
#[derive(Debug, Clone)]
pub struct SubmitAnswersCommand {
    pub session_id: SessionId,
    /// Answers in the order the outstanding questions were asked.
    pub answers: Vec<String>,
}

/// Handler for answer submission.
pub struct SubmitAnswersHandler {
    store: Arc<dyn SessionStore>,
    orchestrator: Arc<IntakeOrchestrator>,
    locks: Arc<SessionLocks>,
}

impl SubmitAnswersHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        orchestrator: Arc<IntakeOrchestrator>,
        locks: Arc<SessionLocks>,
    ) -> Self {
        Self {
            store,
            orchestrator,
            locks,
        }
    }

    /// Appends the answers, resumes orchestration, and checkpoints.
    ///
    /// The whole load-advance-save cycle runs under the session's lock, so
    /// concurrent submissions serialize instead of clobbering each other.
    /// Terminal sessions are returned as-is without touching the generator.
    pub async fn handle(&self, cmd: SubmitAnswersCommand) -> Result<IntakeView, IntakeError> {
        let _guard = self.locks.acquire(&cmd.session_id).await;

        let mut state = self
            .store
            .load(&cmd.session_id)
            .await?
            .ok_or(IntakeError::SessionNotFound(cmd.session_id))?;

        if state.phase().is_terminal() {
            return Ok(IntakeView::from_state(cmd.session_id, &state));
        }

        if cmd.answers.is_empty() {
            return Err(IntakeError::contract("no answers provided"));
        }

        let outstanding = state.outstanding_questions();
        if cmd.answers.len() > outstanding {
            return Err(IntakeError::contract(format!(
                "received {} answers for {} outstanding questions",
                cmd.answers.len(),
                outstanding
            )));
        }

        state.append_answers(cmd.answers);
        let phase = self.orchestrator.advance(&mut state).await;
        self.store.save(&cmd.session_id, &state).await?;

        info!(
            session_id = %cmd.session_id,
            phase = ?phase,
            iteration = state.iteration_count,
            "answers processed"
        );

        Ok(IntakeView::from_state(cmd.session_id, &state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockTextGenerator;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::intake::question_round::DEFAULT_MAX_ROUNDS;
    use crate::domain::intake::{IntakePhase, IntakeState};

    struct Fixture {
        handler: SubmitAnswersHandler,
        store: Arc<InMemorySessionStore>,
        generator: MockTextGenerator,
    }

    fn fixture(generator: MockTextGenerator) -> Fixture {
        let store = Arc::new(InMemorySessionStore::new());
        let orchestrator = Arc::new(IntakeOrchestrator::new(
            Arc::new(generator.clone()),
            DEFAULT_MAX_ROUNDS,
            0.3,
        ));
        Fixture {
            handler: SubmitAnswersHandler::new(
                store.clone(),
                orchestrator,
                Arc::new(SessionLocks::new()),
            ),
            store,
            generator,
        }
    }

    async fn seed(store: &InMemorySessionStore, state: &IntakeState) -> SessionId {
        let id = SessionId::new();
        store.save(&id, state).await.unwrap();
        id
    }

    fn awaiting_state() -> IntakeState {
        let mut state = IntakeState::new("I want to apply for a divorce");
        state.questions = vec!["Where do you reside?".to_string()];
        state.iteration_count = 1;
        state
    }

    #[tokio::test]
    async fn answers_resume_orchestration_to_next_round() {
        let fx = fixture(
            MockTextGenerator::new().with_question_batch("follow-up", &["Any children?"], false),
        );
        let id = seed(&fx.store, &awaiting_state()).await;

        let view = fx
            .handler
            .handle(SubmitAnswersCommand {
                session_id: id,
                answers: vec!["Dubai".to_string()],
            })
            .await
            .unwrap();

        assert_eq!(view.phase, IntakePhase::AwaitingAnswers);
        assert_eq!(view.iteration_count, 2);
        assert_eq!(view.questions, vec!["Where do you reside?", "Any children?"]);
        assert_eq!(view.answers, vec!["Dubai"]);
    }

    #[tokio::test]
    async fn answers_can_complete_the_session() {
        let fx = fixture(
            MockTextGenerator::new()
                .with_question_batch("enough gathered", &[], true)
                .with_response("Case summary: divorce filing in Dubai."),
        );
        let id = seed(&fx.store, &awaiting_state()).await;

        let view = fx
            .handler
            .handle(SubmitAnswersCommand {
                session_id: id,
                answers: vec!["Dubai".to_string()],
            })
            .await
            .unwrap();

        assert_eq!(view.phase, IntakePhase::Done);
        assert_eq!(
            view.final_description.as_deref(),
            Some("Case summary: divorce filing in Dubai.")
        );
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let fx = fixture(MockTextGenerator::new());
        let missing = SessionId::new();

        let result = fx
            .handler
            .handle(SubmitAnswersCommand {
                session_id: missing,
                answers: vec!["A".to_string()],
            })
            .await;

        assert!(matches!(
            result,
            Err(IntakeError::SessionNotFound(id)) if id == missing
        ));
    }

    #[tokio::test]
    async fn over_answering_is_rejected_without_mutation() {
        let fx = fixture(MockTextGenerator::new());
        let id = seed(&fx.store, &awaiting_state()).await;

        let result = fx
            .handler
            .handle(SubmitAnswersCommand {
                session_id: id,
                answers: vec!["A1".to_string(), "A2".to_string()],
            })
            .await;

        assert!(matches!(result, Err(IntakeError::ContractViolation(_))));
        let state = fx.store.load(&id).await.unwrap().unwrap();
        assert!(state.answers.is_empty());
        assert_eq!(fx.generator.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_submission_is_rejected() {
        let fx = fixture(MockTextGenerator::new());
        let id = seed(&fx.store, &awaiting_state()).await;

        let result = fx
            .handler
            .handle(SubmitAnswersCommand {
                session_id: id,
                answers: vec![],
            })
            .await;

        assert!(matches!(result, Err(IntakeError::ContractViolation(_))));
    }

    #[tokio::test]
    async fn done_session_returns_view_without_generator_call() {
        let fx = fixture(MockTextGenerator::new());
        let mut state = awaiting_state();
        state.answers = vec!["Dubai".to_string()];
        state.is_complete = true;
        state.final_description = Some("Case summary".to_string());
        let id = seed(&fx.store, &state).await;

        let view = fx
            .handler
            .handle(SubmitAnswersCommand {
                session_id: id,
                answers: vec!["again".to_string()],
            })
            .await
            .unwrap();

        assert_eq!(view.phase, IntakePhase::Done);
        assert_eq!(view.answers, vec!["Dubai"]);
        assert_eq!(fx.generator.call_count(), 0);
    }

    #[tokio::test]
    async fn failed_session_is_absorbing() {
        let fx = fixture(MockTextGenerator::new());
        let mut state = awaiting_state();
        state.error = Some("question generation failed: timeout".to_string());
        let id = seed(&fx.store, &state).await;

        let view = fx
            .handler
            .handle(SubmitAnswersCommand {
                session_id: id,
                answers: vec!["Dubai".to_string()],
            })
            .await
            .unwrap();

        assert_eq!(view.phase, IntakePhase::Failed);
        assert!(view.answers.is_empty());
        assert_eq!(fx.generator.call_count(), 0);
    }

    #[tokio::test]
    async fn partial_answers_keep_session_suspended() {
        let fx = fixture(MockTextGenerator::new());
        let mut state = awaiting_state();
        state.questions.push("Do you have children?".to_string());
        let id = seed(&fx.store, &state).await;

        let view = fx
            .handler
            .handle(SubmitAnswersCommand {
                session_id: id,
                answers: vec!["Dubai".to_string()],
            })
            .await
            .unwrap();

        // One of two questions answered: still suspended, no new round.
        assert_eq!(view.phase, IntakePhase::AwaitingAnswers);
        assert_eq!(view.outstanding_questions().len(), 1);
        assert_eq!(fx.generator.call_count(), 0);
    }
}
