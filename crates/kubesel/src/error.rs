//! Error types for the kubesel crate.

use std::fmt;

use thiserror::Error;

/// Which part of a requirement failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationTarget {
    /// A label key (optional prefix plus name).
    Key,
    /// A single label value.
    Value,
    /// The value set as a whole (cardinality or operand type).
    Values,
}

impl ValidationTarget {
    /// Returns the display name of this target.
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationTarget::Key => "key",
            ValidationTarget::Value => "value",
            ValidationTarget::Values => "values",
        }
    }
}

impl fmt::Display for ValidationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when parsing or converting a selector.
///
/// Matching itself never fails; every error is raised while a
/// [`Selector`](crate::Selector) or [`Requirement`](crate::Requirement) is
/// being built, and no partial result is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Malformed selector text.
    #[error("syntax error at position {position}: found {found:?}, expected {expected}")]
    Syntax {
        /// Byte offset into the selector text.
        position: usize,
        /// The offending character or token (empty at end of input).
        found: String,
        /// What the grammar allowed at this position.
        expected: String,
    },

    /// A key or value violates the label syntax rules.
    #[error("invalid label {target} {value:?}: {reason}")]
    Validation {
        target: ValidationTarget,
        value: String,
        reason: String,
    },

    /// A structured selector names an operator outside the supported set.
    #[error("{operator:?} is not a valid label selector operator")]
    UnsupportedOperator { operator: String },
}

impl SelectorError {
    /// Creates a syntax error.
    pub fn syntax(position: usize, found: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            found: found.into(),
            expected: expected.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(
        target: ValidationTarget,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Validation {
            target,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unsupported-operator error.
    pub fn unsupported_operator(operator: impl Into<String>) -> Self {
        Self::UnsupportedOperator {
            operator: operator.into(),
        }
    }

    /// Returns `true` for errors raised by the tokenizer or grammar.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }

    /// Returns `true` for key/value validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Result type for kubesel operations.
pub type Result<T> = std::result::Result<T, SelectorError>;
