//! Error types for the intake domain.
//!
//! Generation failures are deliberately NOT represented here: per the round
//! contract they become data (`IntakeState.error`) and move the session to
//! `Failed`. This enum covers the conditions that are returned to the caller
//! instead of being recorded into the session.

use crate::domain::foundation::SessionId;
use crate::ports::StoreError;

/// Intake orchestration errors surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// No session exists under the given id.
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// A precondition was violated; state was not mutated.
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// Persistence failed; propagated as-is.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntakeError {
    /// Creates a contract violation error.
    pub fn contract(message: impl Into<String>) -> Self {
        Self::ContractViolation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_not_found_displays_id() {
        let id = SessionId::new();
        let err = IntakeError::SessionNotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn contract_violation_displays_reason() {
        let err = IntakeError::contract("more answers than outstanding questions");
        assert_eq!(
            err.to_string(),
            "contract violation: more answers than outstanding questions"
        );
    }

    #[test]
    fn store_error_passes_through() {
        let err: IntakeError = StoreError::database("connection refused").into();
        assert_eq!(err.to_string(), "database error: connection refused");
    }
}
