//! Disagreement handlers.

mod run_disagreement;

pub use run_disagreement::{
    RunDisagreementCommand, RunDisagreementHandler, DEFAULT_LIVE_TIMEOUT, DEFAULT_MAX_TOKENS,
    DEFAULT_TEMPERATURE,
};
