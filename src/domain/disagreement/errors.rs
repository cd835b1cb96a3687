//! Disagreement errors.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};

/// Errors from running the disagreement pipeline.
///
/// Provider failures are absorbed by the mock fallback, so only input problems
/// surface to callers.
#[derive(Debug, Clone, Error)]
pub enum DisagreementError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

impl DisagreementError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DisagreementError::Validation(err) => err.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_code_passes_through() {
        let err = DisagreementError::from(ValidationError::empty_field("decision"));
        assert_eq!(err.code(), ErrorCode::EmptyField);
        assert_eq!(err.to_string(), "invalid input: Field 'decision' cannot be empty");
    }
}
