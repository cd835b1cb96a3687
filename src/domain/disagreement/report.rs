//! Disagreement Report - The assembled output of one pipeline run.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ReportId, Timestamp};

use super::{BiasReport, Counterargument, SecondOrderImpact, StructuredIntent};

/// Which path produced the counterarguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisMode {
    /// Fixed templates, no model call.
    Mock,
    /// A language model produced the counterarguments.
    Live { provider: String, model: String },
}

impl AnalysisMode {
    pub fn is_live(&self) -> bool {
        matches!(self, AnalysisMode::Live { .. })
    }

    /// Short label for display, e.g. "Mock mode" or "openai / gpt-4o-mini".
    pub fn label(&self) -> String {
        match self {
            AnalysisMode::Mock => "Mock mode".to_string(),
            AnalysisMode::Live { provider, model } => format!("{} / {}", provider, model),
        }
    }
}

/// Full result of challenging a decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisagreementReport {
    pub id: ReportId,
    pub mode: AnalysisMode,
    pub intent: StructuredIntent,
    pub bias: BiasReport,
    pub counterarguments: Vec<Counterargument>,
    pub impacts: Vec<SecondOrderImpact>,
    pub recommendations: Vec<String>,
    pub generated_at: Timestamp,
}
