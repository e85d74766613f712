//! StartIntakeHandler - Command handler for opening a new intake session.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::SessionId;
use crate::domain::intake::{IntakeError, IntakeOrchestrator, IntakeState};
use crate::ports::SessionStore;

use super::view::IntakeView;

/// Command to start a new intake session.
#[derive(Debug, Clone)]
pub struct StartIntakeCommand {
    /// The caller's initial description of their legal matter. May be empty;
    /// the first question round compensates with broad questions.
    pub initial_description: String,
}

/// Handler for starting intake sessions.
pub struct StartIntakeHandler {
    store: Arc<dyn SessionStore>,
    orchestrator: Arc<IntakeOrchestrator>,
}

impl StartIntakeHandler {
    pub fn new(store: Arc<dyn SessionStore>, orchestrator: Arc<IntakeOrchestrator>) -> Self {
        Self {
            store,
            orchestrator,
        }
    }

    /// Creates the session, runs the first round, and checkpoints.
    ///
    /// The session id is freshly minted, so no lock is needed: nobody else
    /// can address this session before the response returns.
    pub async fn handle(&self, cmd: StartIntakeCommand) -> Result<IntakeView, IntakeError> {
        let session_id = SessionId::new();
        let mut state = IntakeState::new(cmd.initial_description);

        let phase = self.orchestrator.advance(&mut state).await;
        self.store.save(&session_id, &state).await?;

        info!(
            session_id = %session_id,
            phase = ?phase,
            questions = state.questions.len(),
            "intake session started"
        );

        Ok(IntakeView::from_state(session_id, &state))
    }
}
