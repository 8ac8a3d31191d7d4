//! Structured selector documents.
//!
//! A [`LabelSelector`] is the object form of a selector:
//!
//! ```json
//! {
//!   "matchLabels": { "app": "nginx" },
//!   "matchExpressions": [
//!     { "key": "tier", "operator": "In", "values": ["web", "api"] }
//!   ]
//! }
//! ```
//!
//! Conversion produces the same [`Selector`] the text parser would, using
//! the same validation rules. Decoding the document is the caller's job;
//! these types only derive `serde` so any format can feed them.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SelectorError, ValidationTarget};
use crate::op::Operator;
use crate::requirement::Requirement;
use crate::selector::Selector;

/// One entry of `matchExpressions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSelectorRequirement {
    pub key: String,
    /// Kept as text so an unknown operator is reported by conversion
    /// rather than by the decoder.
    pub operator: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<String>,
}

impl LabelSelectorRequirement {
    /// Creates an expression entry.
    pub fn new<I, S>(key: impl Into<String>, operator: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LabelSelectorRequirement {
            key: key.into(),
            operator: operator.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Converts this entry into a [`Requirement`].
    pub fn to_requirement(&self) -> Result<Requirement> {
        let operator = Operator::from_document_name(&self.operator)
            .ok_or_else(|| SelectorError::unsupported_operator(self.operator.as_str()))?;

        if operator.is_existence() && !self.values.is_empty() {
            return Err(SelectorError::validation(
                ValidationTarget::Values,
                self.values.join(","),
                format!("values must be empty when operator is {}", self.operator),
            ));
        }
        if operator.is_set() && self.values.is_empty() {
            return Err(SelectorError::validation(
                ValidationTarget::Values,
                "",
                format!("values must be non-empty when operator is {}", self.operator),
            ));
        }

        Requirement::new(self.key.as_str(), operator, self.values.iter().map(String::as_str))
    }
}

/// The `matchLabels` + `matchExpressions` form of a selector.
///
/// # Example
///
/// ```
/// use kubesel::{LabelSelector, LabelSet};
///
/// let doc = LabelSelector::new()
///     .match_label("app", "nginx")
///     .match_expression("tier", "NotIn", ["cache"]);
/// let selector = doc.to_selector().unwrap();
///
/// assert_eq!(selector.to_string(), "app=nginx,tier notin (cache)");
/// assert!(selector.matches(&LabelSet::new().with("app", "nginx")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_labels: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_expressions: Vec<LabelSelectorRequirement>,
}

impl LabelSelector {
    /// Creates an empty document, which selects everything.
    pub fn new() -> Self {
        LabelSelector::default()
    }

    /// Adds a `matchLabels` entry.
    pub fn match_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.match_labels.insert(key.into(), value.into());
        self
    }

    /// Adds a `matchExpressions` entry.
    pub fn match_expression<I, S>(
        mut self,
        key: impl Into<String>,
        operator: impl Into<String>,
        values: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.match_expressions
            .push(LabelSelectorRequirement::new(key, operator, values));
        self
    }

    /// Returns `true` if the document has no labels and no expressions.
    pub fn is_empty(&self) -> bool {
        self.match_labels.is_empty() && self.match_expressions.is_empty()
    }

    /// Converts the document into a [`Selector`].
    ///
    /// `matchLabels` entries become `Equals` requirements (in key order),
    /// followed by `matchExpressions` in document order. An empty document
    /// converts to the empty selector, which matches everything.
    pub fn to_selector(&self) -> Result<Selector> {
        let mut selector = Selector::everything();
        for (key, value) in &self.match_labels {
            selector = selector.add(Requirement::equals(key.as_str(), value.as_str())?);
        }
        for expression in &self.match_expressions {
            selector = selector.add(expression.to_requirement()?);
        }
        tracing::trace!(
            match_labels = self.match_labels.len(),
            match_expressions = self.match_expressions.len(),
            "converted label selector document"
        );
        Ok(selector)
    }
}

impl TryFrom<&LabelSelector> for Selector {
    type Error = SelectorError;

    fn try_from(doc: &LabelSelector) -> Result<Self> {
        doc.to_selector()
    }
}

impl TryFrom<LabelSelector> for Selector {
    type Error = SelectorError;

    fn try_from(doc: LabelSelector) -> Result<Self> {
        doc.to_selector()
    }
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
