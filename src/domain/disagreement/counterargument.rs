//! Counterargument Generator - Devil's advocate prompts, parsing, and templates.
//!
//! The generator itself never calls a model. It builds the prompt, parses a
//! completion into counterarguments, and supplies the fixed templates used in
//! mock mode or when a live completion fails.

use serde::{Deserialize, Serialize};

use super::{BiasReport, StructuredIntent};

/// Maximum number of counterarguments kept from a completion.
pub const MAX_COUNTERARGUMENTS: usize = 3;

/// System prompt for live counterargument generation.
pub const DEVILS_ADVOCATE_SYSTEM_PROMPT: &str = "You are a constructive devil's advocate. \
You challenge decisions respectfully and concretely, and you always pair a risk with a way to reduce it.";

/// Perspective a counterargument is written from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterargumentKind {
    /// Challenges the facts and market assumptions.
    Factual,
    /// Challenges long-term consequences and optionality.
    LongTerm,
    /// Challenges the numbers behind the projections.
    Skeptical,
    /// Produced by a language model.
    Generated,
}

/// A single challenge to the decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterargument {
    pub kind: CounterargumentKind,
    pub text: String,
}

impl Counterargument {
    pub fn new(kind: CounterargumentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Stateless helper for counterargument generation.
pub struct CounterargumentGenerator;

impl CounterargumentGenerator {
    /// The fixed counterarguments used in mock mode.
    pub fn templates() -> Vec<Counterargument> {
        vec![
            Counterargument::new(
                CounterargumentKind::Factual,
                "Factual: Market adoption for Product X may be slower than expected due to existing competitors and required integrations.",
            ),
            Counterargument::new(
                CounterargumentKind::LongTerm,
                "Long-term: Launching now could lock resources and reduce ability to pivot if early signals are negative.",
            ),
            Counterargument::new(
                CounterargumentKind::Skeptical,
                "Skeptical: Projections assume 30% conversion\u{2014}if conversion is half, ROI turns negative in year 1.",
            ),
        ]
    }

    /// Builds the user prompt asking a model to argue against the decision.
    pub fn prompt_for(intent: &StructuredIntent, bias: &BiasReport) -> String {
        let mut prompt = format!(
            "Act as a constructive devil's advocate. Provide {} concise counterarguments to the decision: {} \
Be specific about what could go wrong and propose risk-mitigation alternatives. \
Return one counterargument per line with no preamble.",
            MAX_COUNTERARGUMENTS, intent.decision
        );

        prompt.push_str(&format!(
            "\nTimeframe: {}. Stated goals: {}.",
            intent.timeframe, intent.stated_goals
        ));

        if bias.has_bias() {
            let names: Vec<&str> = bias.flags.iter().map(|f| f.as_str()).collect();
            prompt.push_str(&format!(
                "\nThe wording suggests these biases; press on them: {}.",
                names.join(", ")
            ));
        }

        prompt
    }

    /// Parses a model completion into at most [`MAX_COUNTERARGUMENTS`] entries.
    ///
    /// Blank lines are skipped; bullets and list numbering are stripped.
    pub fn parse_completion(text: &str) -> Vec<Counterargument> {
        text.lines()
            .map(strip_list_marker)
            .filter(|line| !line.is_empty())
            .take(MAX_COUNTERARGUMENTS)
            .map(|line| Counterargument::new(CounterargumentKind::Generated, line))
            .collect()
    }
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim().trim_start_matches(['-', '*', '\u{2022}', ' ']);

    // "1." / "2)" numbering, but not "3.5x"
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(rest) = line[digits..]
            .strip_prefix('.')
            .or_else(|| line[digits..].strip_prefix(')'))
        {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return rest.trim();
            }
        }
    }
    line.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::disagreement::BiasFlag;

    fn intent() -> StructuredIntent {
        StructuredIntent {
            decision: "Launch Product X in 3 months".to_string(),
            actor: "Leadership Team".to_string(),
            action: "Launch Product X".to_string(),
            timeframe: "3 months".to_string(),
            stated_goals: "growth".to_string(),
            confidence_clues: vec!["neutral".to_string()],
        }
    }

    #[test]
    fn templates_cover_three_perspectives() {
        let kinds: Vec<_> = CounterargumentGenerator::templates()
            .into_iter()
            .map(|c| c.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                CounterargumentKind::Factual,
                CounterargumentKind::LongTerm,
                CounterargumentKind::Skeptical
            ]
        );
    }

    #[test]
    fn prompt_contains_decision_and_biases() {
        let bias = BiasReport {
            flags: vec![BiasFlag::Overconfidence],
            explanations: vec!["Detected overconfidence".to_string()],
        };
        let prompt = CounterargumentGenerator::prompt_for(&intent(), &bias);

        assert!(prompt.contains("Launch Product X in 3 months"));
        assert!(prompt.contains("3 concise counterarguments"));
        assert!(prompt.contains("overconfidence"));
    }

    #[test]
    fn prompt_omits_bias_line_when_none() {
        let prompt = CounterargumentGenerator::prompt_for(&intent(), &BiasReport::none());
        assert!(!prompt.contains("biases"));
    }

    #[test]
    fn parse_strips_bullets_and_numbering() {
        let completion = "\n- Adoption may lag.\n\n2) Costs could overrun.\n3. Team burnout risk.\n* Extra line dropped";
        let parsed = CounterargumentGenerator::parse_completion(completion);

        let texts: Vec<_> = parsed.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Adoption may lag.", "Costs could overrun.", "Team burnout risk."]
        );
        assert!(parsed.iter().all(|c| c.kind == CounterargumentKind::Generated));
    }

    #[test]
    fn parse_keeps_leading_numbers_that_are_not_list_markers() {
        let parsed = CounterargumentGenerator::parse_completion("30% of pilots fail");
        assert_eq!(parsed[0].text, "30% of pilots fail");
    }

    #[test]
    fn parse_keeps_decimal_figures_intact() {
        let parsed =
            CounterargumentGenerator::parse_completion("3.5x more churn than planned
2) Risk
4.");
        let texts: Vec<_> = parsed.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["3.5x more churn than planned", "Risk"]);
    }

    #[test]
    fn parse_of_blank_completion_is_empty() {
        assert!(CounterargumentGenerator::parse_completion("  \n\n - \n").is_empty());
    }
}
