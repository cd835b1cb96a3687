//! HTTP DTOs (Data Transfer Objects) for disagreement endpoints.
//!
//! These types define the JSON and form structure of the API. They are the
//! boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::domain::disagreement::{
    AnalysisMode, Counterargument, DisagreementError, DisagreementReport, SecondOrderImpact,
    StructuredIntent,
};
use crate::domain::foundation::ErrorCode;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// JSON request to challenge a decision.
#[derive(Debug, Clone, Deserialize)]
pub struct RunDisagreementRequest {
    /// One paragraph describing the decision.
    pub decision: String,
    /// Constraints, goals, timeframe.
    #[serde(default)]
    pub context: Option<String>,
}

/// Form submission from the HTML page.
#[derive(Debug, Clone, Deserialize)]
pub struct RunDisagreementForm {
    #[serde(default)]
    pub decision: String,
    #[serde(default)]
    pub context: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Full disagreement report for API response.
#[derive(Debug, Clone, Serialize)]
pub struct DisagreementResponse {
    pub id: String,
    pub mode: AnalysisMode,
    pub intent: StructuredIntent,
    pub bias: BiasResponse,
    pub counterarguments: Vec<Counterargument>,
    pub impacts: Vec<SecondOrderImpact>,
    pub recommendations: Vec<String>,
    /// ISO 8601.
    pub generated_at: String,
}

/// Bias section. `flags` is never empty.
#[derive(Debug, Clone, Serialize)]
pub struct BiasResponse {
    pub flags: Vec<String>,
    pub explanations: Vec<String>,
}

impl From<DisagreementReport> for DisagreementResponse {
    fn from(report: DisagreementReport) -> Self {
        Self {
            id: report.id.to_string(),
            generated_at: report.generated_at.to_rfc3339(),
            bias: BiasResponse {
                flags: report
                    .bias
                    .flag_labels()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                explanations: report.bias.explanations,
            },
            mode: report.mode,
            intent: report.intent,
            counterarguments: report.counterarguments,
            impacts: report.impacts,
            recommendations: report.recommendations,
        }
    }
}

/// Service health and analysis mode.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// "mock" or "live".
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl From<&DisagreementError> for ErrorResponse {
    fn from(err: &DisagreementError) -> Self {
        let response = ErrorResponse::new(err.code(), err.to_string());
        match err {
            DisagreementError::Validation(v) => response.with_field(v.field()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::disagreement::{BiasReport, CounterargumentGenerator};
    use crate::domain::foundation::{ReportId, Timestamp, ValidationError};

    #[test]
    fn request_context_is_optional() {
        let req: RunDisagreementRequest =
            serde_json::from_str(r#"{"decision": "Ship it"}"#).unwrap();
        assert_eq!(req.decision, "Ship it");
        assert!(req.context.is_none());
    }

    #[test]
    fn response_reports_placeholder_flag_when_no_bias() {
        let report = DisagreementReport {
            id: ReportId::new(),
            mode: AnalysisMode::Mock,
            intent: StructuredIntent {
                decision: "Ship it".to_string(),
                actor: "Leadership Team".to_string(),
                action: "Ship it".to_string(),
                timeframe: "3 months".to_string(),
                stated_goals: "growth".to_string(),
                confidence_clues: vec!["neutral".to_string()],
            },
            bias: BiasReport::none(),
            counterarguments: CounterargumentGenerator::templates(),
            impacts: vec![],
            recommendations: vec![],
            generated_at: Timestamp::now(),
        };

        let json = serde_json::to_value(DisagreementResponse::from(report)).unwrap();

        assert_eq!(json["bias"]["flags"], serde_json::json!(["no_strong_bias_detected"]));
        assert_eq!(json["mode"]["type"], "mock");
        assert_eq!(json["counterarguments"][0]["kind"], "factual");
    }

    #[test]
    fn validation_error_maps_to_error_response() {
        let err = DisagreementError::from(ValidationError::empty_field("decision"));
        let resp = ErrorResponse::from(&err);

        assert_eq!(resp.code, "EMPTY_FIELD");
        assert_eq!(resp.field.as_deref(), Some("decision"));
        assert_eq!(resp.message, "invalid input: Field 'decision' cannot be empty");
    }

    #[test]
    fn unreadable_body_error_omits_field() {
        let json = serde_json::to_value(ErrorResponse::new(
            ErrorCode::ValidationFailed,
            "missing field `decision`",
        ))
        .unwrap();

        assert_eq!(
            json,
            serde_json::json!({"code": "VALIDATION_FAILED", "message": "missing field `decision`"})
        );
    }
}
