//! Recommendation Advisor - Steps that reduce the risk of the decision.

use super::{Counterargument, SecondOrderImpact};

/// Stateless advisor for de-risking recommendations.
pub struct RecommendationAdvisor;

impl RecommendationAdvisor {
    /// Recommends a pilot, explicit go/no-go criteria, and a contingency budget.
    pub fn recommend(
        _counterarguments: &[Counterargument],
        _impacts: &[SecondOrderImpact],
    ) -> Vec<String> {
        vec![
            "Run a 6-week pilot with 2 key clients to validate assumptions before full launch."
                .to_string(),
            "Define go/no-go criteria tied to conversion and retention metrics.".to_string(),
            "Allocate a contingency budget and maintain option to rollback marketing spend."
                .to_string(),
        ]
    }
}
