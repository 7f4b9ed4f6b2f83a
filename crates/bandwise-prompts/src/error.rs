//! Errors raised while filling question templates.

use thiserror::Error;

/// Errors that can occur while generating a question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    /// A `{name}` slot was left in the generated prompt.
    #[error("template left placeholder '{placeholder}' unresolved")]
    UnresolvedPlaceholder { placeholder: String },

    /// A value pool had nothing to pick from.
    #[error("value pool '{0}' is empty")]
    EmptyPool(&'static str),

    /// The placeholder pattern failed to compile.
    #[error("placeholder pattern failed to compile: {0}")]
    Pattern(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = PromptError::UnresolvedPlaceholder {
            placeholder: "{chart}".into(),
        };
        assert_eq!(err.to_string(), "template left placeholder '{chart}' unresolved");
        assert_eq!(
            PromptError::EmptyPool("locations").to_string(),
            "value pool 'locations' is empty"
        );
    }
}
