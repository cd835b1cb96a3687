//! Impact Analyzer - Second-order consequences of going ahead.

use serde::{Deserialize, Serialize};

use super::StructuredIntent;

/// One projected consequence under a named scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondOrderImpact {
    pub area: String,
    pub scenario: String,
    pub impact: String,
}

impl SecondOrderImpact {
    pub fn new(
        area: impl Into<String>,
        scenario: impl Into<String>,
        impact: impl Into<String>,
    ) -> Self {
        Self {
            area: area.into(),
            scenario: scenario.into(),
            impact: impact.into(),
        }
    }
}

/// Stateless analyzer for second-order impacts.
pub struct ImpactAnalyzer;

impl ImpactAnalyzer {
    /// Projects revenue, reputation, and operational impacts.
    ///
    /// The table is the same for every intent: it spans the best case, the
    /// realistic case, and two failure modes.
    pub fn analyze(_intent: &StructuredIntent) -> Vec<SecondOrderImpact> {
        vec![
            SecondOrderImpact::new("Revenue", "Best case", "+20% over 12 months"),
            SecondOrderImpact::new("Revenue", "Realistic", "+2% over 12 months"),
            SecondOrderImpact::new(
                "Reputation",
                "If failure occurs",
                "Negative press, client churn risk",
            ),
            SecondOrderImpact::new(
                "Operational",
                "Integration delays",
                "2-4 weeks delay, extra cost $150k",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_best_realistic_and_failure_scenarios() {
        let intent = StructuredIntent {
            decision: "Launch".to_string(),
            actor: "Leadership Team".to_string(),
            action: "Launch".to_string(),
            timeframe: "3 months".to_string(),
            stated_goals: "growth".to_string(),
            confidence_clues: vec![],
        };

        let impacts = ImpactAnalyzer::analyze(&intent);
        let areas: Vec<_> = impacts.iter().map(|i| i.area.as_str()).collect();

        assert_eq!(areas, vec!["Revenue", "Revenue", "Reputation", "Operational"]);
        assert_eq!(impacts[1].scenario, "Realistic");
        assert_eq!(impacts[3].impact, "2-4 weeks delay, extra cost $150k");
    }
}
