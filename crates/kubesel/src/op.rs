//! Selector operators.
//!
//! The [`Operator`] enum is the closed set of relations a requirement can
//! express between a label key and its values. Operators are grouped by the
//! number of values they take.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Relation between a label key and a requirement's values.
///
/// Operators are grouped by arity:
/// - **Exact**: `Equals`, `DoubleEquals`, `NotEquals` take one value
/// - **Set**: `In`, `NotIn` take one or more values
/// - **Existence**: `Exists`, `DoesNotExist` take no values
/// - **Ordering**: `GreaterThan`, `LessThan` take one integer value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Operator {
    /// `key=value`
    Equals,
    /// `key==value`, same semantics as `Equals`.
    DoubleEquals,
    /// `key!=value`
    NotEquals,
    /// `key in (a,b)`
    In,
    /// `key notin (a,b)`
    NotIn,
    /// `key`
    Exists,
    /// `!key`
    DoesNotExist,
    /// `key>5`
    GreaterThan,
    /// `key<5`
    LessThan,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Operator; 9] = [
        Operator::Equals,
        Operator::DoubleEquals,
        Operator::NotEquals,
        Operator::In,
        Operator::NotIn,
        Operator::Exists,
        Operator::DoesNotExist,
        Operator::GreaterThan,
        Operator::LessThan,
    ];

    /// Returns `true` for operators that carry exactly one value.
    pub fn is_single_value(self) -> bool {
        matches!(
            self,
            Operator::Equals
                | Operator::DoubleEquals
                | Operator::NotEquals
                | Operator::GreaterThan
                | Operator::LessThan
        )
    }

    /// Returns `true` for the set-membership operators.
    pub fn is_set(self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    /// Returns `true` for the existence operators, which carry no values.
    pub fn is_existence(self) -> bool {
        matches!(self, Operator::Exists | Operator::DoesNotExist)
    }

    /// Returns `true` for the numeric ordering operators.
    pub fn is_ordering(self) -> bool {
        matches!(self, Operator::GreaterThan | Operator::LessThan)
    }

    /// Returns `true` for operators that hold when the key is absent.
    pub fn matches_absent(self) -> bool {
        matches!(
            self,
            Operator::NotEquals | Operator::NotIn | Operator::DoesNotExist
        )
    }

    /// Evaluates an ordering operator given `stored.cmp(operand)`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Operator::GreaterThan => ordering == Ordering::Greater,
            Operator::LessThan => ordering == Ordering::Less,
            _ => false,
        }
    }

    /// Returns the token this operator is written with in selector text.
    ///
    /// `Exists` has no token (a bare key) and yields `""`. `DoesNotExist`
    /// yields `"!"`, which is written before the key rather than after it.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::DoubleEquals => "==",
            Operator::NotEquals => "!=",
            Operator::In => "in",
            Operator::NotIn => "notin",
            Operator::Exists => "",
            Operator::DoesNotExist => "!",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
        }
    }

    /// Returns the name used in structured selector documents, if any.
    pub fn document_name(self) -> Option<&'static str> {
        match self {
            Operator::In => Some("In"),
            Operator::NotIn => Some("NotIn"),
            Operator::Exists => Some("Exists"),
            Operator::DoesNotExist => Some("DoesNotExist"),
            _ => None,
        }
    }

    /// Looks up a structured-document operator name (case-sensitive).
    pub fn from_document_name(name: &str) -> Option<Operator> {
        match name {
            "In" => Some(Operator::In),
            "NotIn" => Some(Operator::NotIn),
            "Exists" => Some(Operator::Exists),
            "DoesNotExist" => Some(Operator::DoesNotExist),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
