//! PostgreSQL implementation of SessionStore.
//!
//! Persists the full `IntakeState` as a JSON document per session. Save is
//! an upsert: the orchestration layer checkpoints after every round, so the
//! common case is overwriting an existing row.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::SessionId;
use crate::domain::intake::IntakeState;
use crate::ports::{SessionStore, StoreError};

/// PostgreSQL implementation of SessionStore.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Creates a new PostgresSessionStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<IntakeState>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT state FROM intake_sessions WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::database(format!("Failed to fetch session: {}", e)))?;

        match row {
            Some(row) => {
                let state_json: String = row
                    .try_get("state")
                    .map_err(|e| StoreError::database(format!("Failed to get state: {}", e)))?;
                let state = serde_json::from_str(&state_json)
                    .map_err(|e| StoreError::Deserialization(e.to_string()))?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, id: &SessionId, state: &IntakeState) -> Result<(), StoreError> {
        let state_json =
            serde_json::to_string(state).map_err(|e| StoreError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO intake_sessions (id, state, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                state = EXCLUDED.state,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(state_json)
        .bind(state.created_at.as_datetime())
        .bind(state.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::database(format!("Failed to upsert session: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM intake_sessions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::database(format!("Failed to delete session: {}", e)))?;

        Ok(())
    }
}
