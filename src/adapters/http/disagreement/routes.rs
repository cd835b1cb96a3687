//! Route configuration for disagreement endpoints.
//!
//! Configures Axum router with the HTML demo and the JSON API.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{health, index, run_disagreement, run_form, DisagreementAppState};

/// Creates the disagreement router with all endpoints.
///
/// Routes:
/// - `GET /` - Input form prefilled with a demo decision
/// - `POST /run` - Form submission, returns the rendered report
/// - `POST /api/disagreements` - Challenge a decision, JSON in and out
/// - `GET /api/health` - Liveness and analysis mode
pub fn disagreement_router() -> Router<DisagreementAppState> {
    Router::new()
        .route("/", get(index))
        .route("/run", post(run_form))
        .route("/api/disagreements", post(run_disagreement))
        .route("/api/health", get(health))
}
