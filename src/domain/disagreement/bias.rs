//! Bias Detector - Keyword heuristics for common cognitive biases.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StructuredIntent;

/// Label reported when no heuristic fires.
pub const NO_BIAS_LABEL: &str = "no_strong_bias_detected";

const OVERCONFIDENCE_CUES: &[&str] = &["sure", "no-brainer"];
const SOCIAL_PROOF_CUES: &[&str] = &["everyone", "obvious"];
const PRESENT_BIAS_CUES: &[&str] = &["short term"];
const OPTIMISM_CUES: &[&str] = &[
    "fast",
    "quick",
    "easy",
    "low cost",
    "scale quickly",
    "no risk",
    "no-brainer",
];

/// A cognitive bias the detector can flag.
///
/// Variant order is the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasFlag {
    Overconfidence,
    SocialProof,
    PresentBias,
    OptimismBias,
}

impl BiasFlag {
    /// All flags in reporting order.
    pub const ALL: [BiasFlag; 4] = [
        BiasFlag::Overconfidence,
        BiasFlag::SocialProof,
        BiasFlag::PresentBias,
        BiasFlag::OptimismBias,
    ];

    /// Wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BiasFlag::Overconfidence => "overconfidence",
            BiasFlag::SocialProof => "social_proof",
            BiasFlag::PresentBias => "present_bias",
            BiasFlag::OptimismBias => "optimism_bias",
        }
    }

    fn cues(&self) -> &'static [&'static str] {
        match self {
            BiasFlag::Overconfidence => OVERCONFIDENCE_CUES,
            BiasFlag::SocialProof => SOCIAL_PROOF_CUES,
            BiasFlag::PresentBias => PRESENT_BIAS_CUES,
            BiasFlag::OptimismBias => OPTIMISM_CUES,
        }
    }

    /// Present bias is read from the stated goals; everything else from the decision.
    fn fires_on(&self, intent: &StructuredIntent) -> bool {
        let haystack = match self {
            BiasFlag::PresentBias => intent.stated_goals.to_lowercase(),
            _ => intent.decision.to_lowercase(),
        };
        self.cues().iter().any(|cue| haystack.contains(cue))
    }
}

impl fmt::Display for BiasFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of bias detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiasReport {
    /// Detected biases, unique, in reporting order.
    pub flags: Vec<BiasFlag>,
    /// One human-readable line per detected flag.
    pub explanations: Vec<String>,
}

impl BiasReport {
    /// Report with nothing detected.
    pub fn none() -> Self {
        Self {
            flags: Vec::new(),
            explanations: Vec::new(),
        }
    }

    /// Returns true if any bias was flagged.
    pub fn has_bias(&self) -> bool {
        !self.flags.is_empty()
    }

    /// Flag names for display. Never empty.
    pub fn flag_labels(&self) -> Vec<&'static str> {
        if self.flags.is_empty() {
            vec![NO_BIAS_LABEL]
        } else {
            self.flags.iter().map(BiasFlag::as_str).collect()
        }
    }
}

/// Stateless detector producing [`BiasReport`]s.
pub struct BiasDetector;

impl BiasDetector {
    /// Runs every heuristic against the intent.
    pub fn detect(intent: &StructuredIntent) -> BiasReport {
        let flags: Vec<BiasFlag> = BiasFlag::ALL
            .into_iter()
            .filter(|flag| flag.fires_on(intent))
            .collect();

        let explanations = flags.iter().map(|f| format!("Detected {}", f)).collect();

        BiasReport {
            flags,
            explanations,
        }
    }
}
