//! Disagreement Module - Pure domain services behind the devil's advocate.
//!
//! A decision flows through five stages:
//!
//! - `IntentDecoder` - who wants to do what, by when, and why
//! - `BiasDetector` - keyword heuristics for cognitive biases
//! - `CounterargumentGenerator` - prompts, completion parsing, mock templates
//! - `ImpactAnalyzer` - second-order consequences under several scenarios
//! - `RecommendationAdvisor` - steps that reduce the risk
//!
//! Everything here is synchronous and free of I/O. The model call lives in the
//! application layer behind the `AIProvider` port.

mod bias;
mod counterargument;
mod decision;
mod errors;
mod impact;
mod intent;
mod recommendation;
mod report;

pub use bias::{BiasDetector, BiasFlag, BiasReport, NO_BIAS_LABEL};
pub use counterargument::{
    Counterargument, CounterargumentGenerator, CounterargumentKind,
    DEVILS_ADVOCATE_SYSTEM_PROMPT, MAX_COUNTERARGUMENTS,
};
pub use decision::{Decision, MAX_CONTEXT_CHARS, MAX_DECISION_CHARS};
pub use errors::DisagreementError;
pub use impact::{ImpactAnalyzer, SecondOrderImpact};
pub use intent::{
    IntentDecoder, StructuredIntent, DEFAULT_ACTION, DEFAULT_ACTOR, DEFAULT_GOALS,
    DEFAULT_TIMEFRAME, INDIVIDUAL_ACTOR,
};
pub use recommendation::RecommendationAdvisor;
pub use report::{AnalysisMode, DisagreementReport};
