//! HTTP handlers for intake endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::intake::{
    GetIntakeStatusHandler, GetIntakeStatusQuery, StartIntakeCommand, StartIntakeHandler,
    SubmitAnswersCommand, SubmitAnswersHandler,
};
use crate::domain::foundation::SessionId;
use crate::domain::intake::IntakeError;

use super::dto::{ErrorResponse, IntakeResponse, StartIntakeRequest, SubmitAnswersRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct IntakeHandlers {
    start_handler: Arc<StartIntakeHandler>,
    submit_handler: Arc<SubmitAnswersHandler>,
    status_handler: Arc<GetIntakeStatusHandler>,
}

impl IntakeHandlers {
    pub fn new(
        start_handler: Arc<StartIntakeHandler>,
        submit_handler: Arc<SubmitAnswersHandler>,
        status_handler: Arc<GetIntakeStatusHandler>,
    ) -> Self {
        Self {
            start_handler,
            submit_handler,
            status_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/intake - Start a new intake session
pub async fn start_intake(
    State(handlers): State<IntakeHandlers>,
    Json(req): Json<StartIntakeRequest>,
) -> Response {
    let cmd = StartIntakeCommand {
        initial_description: req.initial_description,
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(view) => {
            let response: IntakeResponse = view.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_intake_error(e),
    }
}

/// POST /api/intake/:id/answers - Submit answers for outstanding questions
pub async fn submit_answers(
    State(handlers): State<IntakeHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<SubmitAnswersRequest>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid session ID")),
            )
                .into_response()
        }
    };

    let cmd = SubmitAnswersCommand {
        session_id,
        answers: req.answers,
    };

    match handlers.submit_handler.handle(cmd).await {
        Ok(view) => {
            let response: IntakeResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_intake_error(e),
    }
}

/// GET /api/intake/:id - Read a session's current status
pub async fn get_intake_status(
    State(handlers): State<IntakeHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid session ID")),
            )
                .into_response()
        }
    };

    let query = GetIntakeStatusQuery { session_id };

    match handlers.status_handler.handle(query).await {
        Ok(view) => {
            let response: IntakeResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_intake_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_intake_error(error: IntakeError) -> Response {
    match error {
        IntakeError::SessionNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Intake session", &id.to_string())),
        )
            .into_response(),
        IntakeError::ContractViolation(message) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(message)),
        )
            .into_response(),
        IntakeError::Store(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(e.to_string())),
        )
            .into_response(),
    }
}
