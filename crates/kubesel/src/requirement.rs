//! Requirements: one atomic label condition.
//!
//! A [`Requirement`] is a key, an [`Operator`] and a value set. It is
//! validated once at construction and immutable afterwards, so
//! [`Requirement::matches`] is a total function.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::error::{Result, SelectorError, ValidationTarget};
use crate::labels::Labels;
use crate::op::Operator;
use crate::validation::{validate_key, validate_value};

/// A single label condition.
///
/// # Example
///
/// ```
/// use kubesel::{LabelSet, Operator, Requirement};
///
/// let req = Requirement::new("app", Operator::In, ["nginx", "envoy"]).unwrap();
/// assert!(req.matches(&LabelSet::new().with("app", "envoy")));
/// assert_eq!(req.to_string(), "app in (envoy,nginx)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Requirement {
    key: String,
    operator: Operator,
    values: BTreeSet<String>,
}

impl Requirement {
    /// Creates a requirement, validating the key, every value, and the
    /// number of values the operator takes.
    pub fn new<I, S>(key: impl Into<String>, operator: Operator, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.into();
        validate_key(&key)?;
        let values = values
            .into_iter()
            .map(|v| {
                let v = v.into();
                validate_value(&v).map(|_| v)
            })
            .collect::<Result<BTreeSet<String>>>()?;
        Self::assemble(key, operator, values)
    }

    /// Shorthand for an `Exists` requirement.
    pub fn exists(key: impl Into<String>) -> Result<Self> {
        Self::new(key, Operator::Exists, std::iter::empty::<String>())
    }

    /// Shorthand for a `DoesNotExist` requirement.
    pub fn does_not_exist(key: impl Into<String>) -> Result<Self> {
        Self::new(key, Operator::DoesNotExist, std::iter::empty::<String>())
    }

    /// Shorthand for an `Equals` requirement.
    pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        Self::new(key, Operator::Equals, [value.into()])
    }

    /// Shorthand for a `NotEquals` requirement.
    pub fn not_equals(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        Self::new(key, Operator::NotEquals, [value.into()])
    }

    /// Checks operator arity and ordering operands. Key and values must
    /// already be validated.
    pub(crate) fn assemble(
        key: String,
        operator: Operator,
        values: BTreeSet<String>,
    ) -> Result<Self> {
        let reason = if operator.is_existence() && !values.is_empty() {
            Some(format!("operator {operator:?} takes no values"))
        } else if operator.is_set() && values.is_empty() {
            Some(format!("operator {operator:?} requires at least one value"))
        } else if operator.is_single_value() && values.len() != 1 {
            Some(format!("operator {operator:?} requires exactly one value"))
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(SelectorError::validation(
                ValidationTarget::Values,
                join_values(&values),
                reason,
            ));
        }

        if operator.is_ordering() {
            if let Some(v) = values.iter().find(|v| v.parse::<i64>().is_err()) {
                return Err(SelectorError::validation(
                    ValidationTarget::Value,
                    v.as_str(),
                    format!("operator {operator:?} requires an integer value"),
                ));
            }
        }

        Ok(Requirement {
            key,
            operator,
            values,
        })
    }

    /// Returns the label key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the values in sorted order.
    pub fn values(&self) -> &BTreeSet<String> {
        &self.values
    }

    /// Evaluates this requirement against a label set.
    ///
    /// `NotEquals` and `NotIn` hold when the key is absent. Ordering
    /// operators do not match when the stored value is not an integer.
    pub fn matches<L: Labels + ?Sized>(&self, labels: &L) -> bool {
        let Some(stored) = labels.get(&self.key) else {
            return self.operator.matches_absent();
        };

        match self.operator {
            Operator::Exists => true,
            Operator::DoesNotExist => false,
            Operator::Equals | Operator::DoubleEquals | Operator::In => {
                self.values.contains(stored)
            }
            Operator::NotEquals | Operator::NotIn => !self.values.contains(stored),
            Operator::GreaterThan | Operator::LessThan => self.match_ordering(stored),
        }
    }

    fn match_ordering(&self, stored: &str) -> bool {
        let Ok(stored) = stored.parse::<i64>() else {
            return false;
        };
        self.values
            .iter()
            .next()
            .and_then(|operand| operand.parse::<i64>().ok())
            .is_some_and(|operand| self.operator.eval_ordering(stored.cmp(&operand)))
    }
}

fn join_values(values: &BTreeSet<String>) -> String {
    values.iter().map(String::as_str).collect::<Vec<_>>().join(",")
}

impl fmt::Display for Requirement {
    /// Canonical selector text; parses back to an equal requirement.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = join_values(&self.values);
        match self.operator {
            Operator::Exists => write!(f, "{}", self.key),
            Operator::DoesNotExist => write!(f, "!{}", self.key),
            Operator::In | Operator::NotIn => {
                write!(f, "{} {} ({})", self.key, self.operator, values)
            }
            _ => write!(f, "{}{}{}", self.key, self.operator, values),
        }
    }
}
