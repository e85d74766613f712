//! In-memory session store.
//!
//! Backs tests and local development; state lives in a shared map and is
//! lost on shutdown. Clones share the same map.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::SessionId;
use crate::domain::intake::IntakeState;
use crate::ports::{SessionStore, StoreError};

/// Map-backed implementation of the SessionStore port.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, IntakeState>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently held.
    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<IntakeState>, StoreError> {
        Ok(self.sessions.lock().unwrap().get(id).cloned())
    }

    async fn save(&self, id: &SessionId, state: &IntakeState) -> Result<(), StoreError> {
        self.sessions.lock().unwrap().insert(*id, state.clone());
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        self.sessions.lock().unwrap().remove(id);
        Ok(())
    }
}
