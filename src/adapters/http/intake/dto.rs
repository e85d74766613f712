//! HTTP DTOs for intake endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::intake::IntakeView;
use crate::domain::intake::IntakePhase;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start a new intake session.
#[derive(Debug, Clone, Deserialize)]
pub struct StartIntakeRequest {
    /// Free-text description of the legal matter. May be empty.
    #[serde(default)]
    pub initial_description: String,
}

/// Request to submit answers to outstanding questions.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswersRequest {
    /// Answers in the order the questions were asked.
    pub answers: Vec<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Snapshot of an intake session returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeResponse {
    pub session_id: String,
    pub phase: IntakePhase,
    pub questions: Vec<String>,
    pub outstanding_questions: Vec<String>,
    pub answers: Vec<String>,
    pub iteration_count: u32,
    pub is_ready: bool,
    pub is_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<IntakeView> for IntakeResponse {
    fn from(view: IntakeView) -> Self {
        let outstanding_questions = view.outstanding_questions().to_vec();
        Self {
            session_id: view.session_id.to_string(),
            phase: view.phase,
            questions: view.questions,
            outstanding_questions,
            answers: view.answers,
            iteration_count: view.iteration_count,
            is_ready: view.is_ready,
            is_complete: view.is_complete,
            final_description: view.final_description,
            error: view.error,
            created_at: view.created_at.as_datetime().to_rfc3339(),
            updated_at: view.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}
