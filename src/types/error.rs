use thiserror::Error;

/// Structural misuse of the rule-declaration API.
///
/// These are programming errors in validator setup, raised while rules are
/// being declared or when the builder is frozen. Data that fails validation
/// is never reported through this type; see
/// [`ValidationResult`](super::ValidationResult).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("property '{property}' does not resolve to '{expected}' (declared as '{actual}')")]
    InvalidPropertyBinding {
        property: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("cannot rebind property '{property}': expected declared type '{expected}', found '{actual}'")]
    TypeMismatch {
        property: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("required argument '{argument}' is missing")]
    NullArgument { argument: &'static str },

    #[error("property '{property}' was unwrapped but never gated on presence")]
    UngatedUnwrap { property: String },
}
