//! HTTP routes for intake endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_intake_status, start_intake, submit_answers, IntakeHandlers};

/// Creates the intake router with all endpoints.
pub fn intake_routes(handlers: IntakeHandlers) -> Router {
    Router::new()
        .route("/", post(start_intake))
        .route("/:id", get(get_intake_status))
        .route("/:id/answers", post(submit_answers))
        .with_state(handlers)
}
