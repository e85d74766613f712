//! Session store port.
//!
//! Defines the contract for persisting and retrieving intake session state.
//! The orchestration layer checkpoints the full `IntakeState` through this
//! port before every suspension, so resumption after a process restart is a
//! plain `load`.
//!
//! # Design
//!
//! - Keyed by `SessionId`; the state itself carries no identifier
//! - Treated as strongly consistent; write serialization is the caller's
//!   responsibility (per-session locks in the application layer)

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::intake::IntakeState;

/// Errors that can occur during session store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to serialize session state: {0}")]
    Serialization(String),

    #[error("failed to deserialize session state: {0}")]
    Deserialization(String),

    #[error("database error: {0}")]
    Database(String),
}

impl StoreError {
    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }
}

/// Port for durable intake session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the state for a session.
    ///
    /// Returns `None` if no session exists under the given id.
    async fn load(&self, id: &SessionId) -> Result<Option<IntakeState>, StoreError>;

    /// Save (create or overwrite) the state for a session.
    async fn save(&self, id: &SessionId, state: &IntakeState) -> Result<(), StoreError>;

    /// Delete a session (primarily for testing and retention jobs).
    async fn delete(&self, id: &SessionId) -> Result<(), StoreError>;
}
