//! GetIntakeStatusHandler - Read-only view of a session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::intake::IntakeError;
use crate::ports::SessionStore;

use super::view::IntakeView;

/// Query for a session's current status.
#[derive(Debug, Clone)]
pub struct GetIntakeStatusQuery {
    pub session_id: SessionId,
}

/// Handler for status reads.
pub struct GetIntakeStatusHandler {
    store: Arc<dyn SessionStore>,
}

impl GetIntakeStatusHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Returns a snapshot of the persisted state. No lock is taken; a read
    /// concurrent with a submission sees either the old or the new
    /// checkpoint, both of which are consistent.
    pub async fn handle(&self, query: GetIntakeStatusQuery) -> Result<IntakeView, IntakeError> {
        let state = self
            .store
            .load(&query.session_id)
            .await?
            .ok_or(IntakeError::SessionNotFound(query.session_id))?;

        Ok(IntakeView::from_state(query.session_id, &state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::intake::{IntakePhase, IntakeState};

    #[tokio::test]
    async fn returns_view_of_persisted_state() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = SessionId::new();
        let mut state = IntakeState::new("I want to apply for a divorce");
        state.questions = vec!["Where do you reside?".to_string()];
        state.iteration_count = 1;
        store.save(&id, &state).await.unwrap();

        let view = GetIntakeStatusHandler::new(store)
            .handle(GetIntakeStatusQuery { session_id: id })
            .await
            .unwrap();

        assert_eq!(view.session_id, id);
        assert_eq!(view.phase, IntakePhase::AwaitingAnswers);
        assert_eq!(view.questions, vec!["Where do you reside?"]);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let store = Arc::new(InMemorySessionStore::new());
        let missing = SessionId::new();

        let result = GetIntakeStatusHandler::new(store)
            .handle(GetIntakeStatusQuery {
                session_id: missing,
            })
            .await;

        assert!(matches!(
            result,
            Err(IntakeError::SessionNotFound(id)) if id == missing
        ));
    }
}
