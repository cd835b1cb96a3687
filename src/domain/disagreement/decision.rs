//! Decision value object - the text a user wants challenged.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Maximum length of the decision paragraph, in characters.
pub const MAX_DECISION_CHARS: usize = 4000;

/// Maximum length of the optional context, in characters.
pub const MAX_CONTEXT_CHARS: usize = 2000;

/// A validated decision statement with optional surrounding context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    text: String,
    context: Option<String>,
}

impl Decision {
    /// Creates a decision, trimming both fields.
    ///
    /// # Errors
    ///
    /// - `EmptyField("decision")` if the text is blank
    /// - `TooLong` if either field exceeds its limit
    pub fn new(text: impl AsRef<str>, context: Option<&str>) -> Result<Self, ValidationError> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(ValidationError::empty_field("decision"));
        }
        let len = text.chars().count();
        if len > MAX_DECISION_CHARS {
            return Err(ValidationError::too_long("decision", MAX_DECISION_CHARS, len));
        }

        let context = context.map(str::trim).filter(|c| !c.is_empty());
        if let Some(ctx) = context {
            let len = ctx.chars().count();
            if len > MAX_CONTEXT_CHARS {
                return Err(ValidationError::too_long("context", MAX_CONTEXT_CHARS, len));
            }
        }

        Ok(Self {
            text: text.to_string(),
            context: context.map(str::to_string),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}
