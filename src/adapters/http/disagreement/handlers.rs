//! HTTP handlers for disagreement endpoints.
//!
//! These handlers connect Axum routes to the `RunDisagreementHandler`. The JSON
//! API and the HTML form share the same pipeline; only the rendering differs.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Form, Json, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};

use crate::application::handlers::disagreement::{RunDisagreementCommand, RunDisagreementHandler};
use crate::domain::disagreement::DisagreementError;
use crate::domain::foundation::ErrorCode;

use super::dto::{
    DisagreementResponse, ErrorResponse, HealthResponse, RunDisagreementForm,
    RunDisagreementRequest,
};
use super::pages::{render_form_page, render_report_page, DEMO_CONTEXT, DEMO_DECISION};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for disagreement routes.
#[derive(Clone)]
pub struct DisagreementAppState {
    pub handler: Arc<RunDisagreementHandler>,
}

impl DisagreementAppState {
    pub fn new(handler: RunDisagreementHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// JSON API
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/disagreements - Challenge a decision
pub async fn run_disagreement(
    State(state): State<DisagreementAppState>,
    payload: Result<Json<RunDisagreementRequest>, JsonRejection>,
) -> Result<Json<DisagreementResponse>, DisagreementApiError> {
    let Json(request) = payload?;
    let cmd = RunDisagreementCommand::new(request.decision, request.context);
    let report = state.handler.handle(cmd).await?;

    Ok(Json(DisagreementResponse::from(report)))
}

/// GET /api/health - Liveness and analysis mode
pub async fn health(State(state): State<DisagreementAppState>) -> Json<HealthResponse> {
    let info = state.handler.provider_info();

    Json(HealthResponse {
        status: "ok",
        mode: state.handler.mode_label(),
        provider: info.as_ref().map(|i| i.name.clone()),
        model: info.map(|i| i.model),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// HTML pages
// ════════════════════════════════════════════════════════════════════════════════

/// GET / - Form prefilled with the demo decision
pub async fn index(State(state): State<DisagreementAppState>) -> Html<String> {
    Html(render_form_page(
        DEMO_DECISION,
        DEMO_CONTEXT,
        None,
        state.handler.mode_label(),
    ))
}

/// POST /run - Form submission, renders the report below the form
pub async fn run_form(
    State(state): State<DisagreementAppState>,
    Form(form): Form<RunDisagreementForm>,
) -> (StatusCode, Html<String>) {
    let mode = state.handler.mode_label();
    let context = Some(form.context.clone()).filter(|c| !c.trim().is_empty());
    let cmd = RunDisagreementCommand::new(form.decision.clone(), context);

    match state.handler.handle(cmd).await {
        Ok(report) => (
            StatusCode::OK,
            Html(render_report_page(&report, &form.decision, &form.context, mode)),
        ),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected form submission");
            (
                StatusCode::BAD_REQUEST,
                Html(render_form_page(
                    &form.decision,
                    &form.context,
                    Some(&e.to_string()),
                    mode,
                )),
            )
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub enum DisagreementApiError {
    BadRequest(ErrorResponse),
}

impl From<DisagreementError> for DisagreementApiError {
    fn from(err: DisagreementError) -> Self {
        match &err {
            DisagreementError::Validation(_) => {
                DisagreementApiError::BadRequest(ErrorResponse::from(&err))
            }
        }
    }
}

impl From<JsonRejection> for DisagreementApiError {
    fn from(rejection: JsonRejection) -> Self {
        DisagreementApiError::BadRequest(ErrorResponse::new(
            ErrorCode::ValidationFailed,
            rejection.body_text(),
        ))
    }
}

impl IntoResponse for DisagreementApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            DisagreementApiError::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::foundation::ValidationError;
    use crate::ports::{AIProvider, ProviderInfo};

    fn mock_state() -> DisagreementAppState {
        DisagreementAppState::new(RunDisagreementHandler::new(None))
    }

    fn live_state(provider: MockAIProvider) -> DisagreementAppState {
        let provider: Arc<dyn AIProvider> = Arc::new(provider);
        DisagreementAppState::new(RunDisagreementHandler::new(Some(provider)))
    }

    #[tokio::test]
    async fn run_disagreement_returns_report() {
        let request = RunDisagreementRequest {
            decision: DEMO_DECISION.to_string(),
            context: Some(DEMO_CONTEXT.to_string()),
        };

        let Json(resp) = run_disagreement(State(mock_state()), Ok(Json(request)))
            .await
            .unwrap();

        assert_eq!(resp.intent.timeframe, "3 months");
        assert_eq!(resp.counterarguments.len(), 3);
        assert!(resp.bias.flags.contains(&"overconfidence".to_string()));
    }

    #[tokio::test]
    async fn run_disagreement_rejects_blank_decision() {
        let request = RunDisagreementRequest {
            decision: "   ".to_string(),
            context: None,
        };

        let result = run_disagreement(State(mock_state()), Ok(Json(request))).await;

        match result {
            Err(DisagreementApiError::BadRequest(err)) => assert_eq!(err.code, "EMPTY_FIELD"),
            Ok(_) => panic!("blank decision should be rejected"),
        }
    }

    #[tokio::test]
    async fn health_reports_mock_mode_without_provider() {
        let Json(resp) = health(State(mock_state())).await;

        assert_eq!(resp.status, "ok");
        assert_eq!(resp.mode, "mock");
        assert!(resp.provider.is_none());
    }

    #[tokio::test]
    async fn health_reports_provider_in_live_mode() {
        let provider = MockAIProvider::new().with_provider_info(ProviderInfo::new(
            "openai",
            "gpt-4o-mini",
            128_000,
        ));

        let Json(resp) = health(State(live_state(provider))).await;

        assert_eq!(resp.mode, "live");
        assert_eq!(resp.provider.as_deref(), Some("openai"));
        assert_eq!(resp.model.as_deref(), Some("gpt-4o-mini"));
    }

    #[tokio::test]
    async fn run_form_rerenders_form_on_validation_error() {
        let form = RunDisagreementForm {
            decision: String::new(),
            context: "Budget <tight>".to_string(),
        };

        let (status, Html(body)) = run_form(State(mock_state()), Form(form)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("class=\"error\""));
        assert!(body.contains("Budget &lt;tight&gt;"));
    }

    #[tokio::test]
    async fn run_form_renders_live_counterarguments() {
        let provider = MockAIProvider::new().with_response("- Churn may spike\n- Support will lag");
        let form = RunDisagreementForm {
            decision: "Launch the beta next week".to_string(),
            context: String::new(),
        };

        let (status, Html(body)) = run_form(State(live_state(provider)), Form(form)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<li>Churn may spike</li>"));
        assert!(body.contains("Done (mock / mock-model-1)"));
    }

    #[test]
    fn api_error_maps_validation_to_bad_request() {
        let err = DisagreementApiError::from(DisagreementError::from(ValidationError::too_long(
            "decision", 4000, 4001,
        )));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
