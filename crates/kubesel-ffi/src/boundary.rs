//! String-in, status-out evaluation.

use kubesel::{LabelSelector, LabelSet};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::codes;
use crate::error::{DocumentError, StatusCode, TextError};

/// The object handed to [`match_label_selector`].
///
/// A missing or `null` `labelSelector` is the empty selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorDocument {
    #[serde(default, deserialize_with = "object_or_null")]
    label_selector: Option<LabelSelector>,
}

/// `labelSelector` must be a JSON object or `null`.
fn object_or_null<'de, D>(deserializer: D) -> Result<Option<LabelSelector>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(map) = Option::<serde_json::Map<String, serde_json::Value>>::deserialize(deserializer)?
    else {
        return Ok(None);
    };
    LabelSelector::deserialize(serde_json::Value::Object(map))
        .map(Some)
        .map_err(D::Error::custom)
}

impl SelectorDocument {
    pub fn new(label_selector: LabelSelector) -> Self {
        Self {
            label_selector: Some(label_selector),
        }
    }

    pub fn label_selector(&self) -> Option<&LabelSelector> {
        self.label_selector.as_ref()
    }

    pub fn into_label_selector(self) -> LabelSelector {
        self.label_selector.unwrap_or_default()
    }
}

/// Decodes a flat JSON object of string values. `null` is the empty set.
pub fn decode_labels(json: &str) -> serde_json::Result<LabelSet> {
    let labels: Option<LabelSet> = serde_json::from_str(json)?;
    Ok(labels.unwrap_or_default())
}

/// Decodes a `{"labelSelector": …}` document. The top level must be an object.
pub fn decode_document(json: &str) -> serde_json::Result<SelectorDocument> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(serde_json::Error::custom("selector document must be a JSON object"));
    }
    SelectorDocument::deserialize(value)
}

/// Parses `selector`, decodes `labels_json`, and evaluates.
pub fn evaluate_text(selector: &str, labels_json: &str) -> Result<bool, TextError> {
    let selector = kubesel::parse(selector).map_err(TextError::Selector)?;
    let labels = decode_labels(labels_json).map_err(TextError::Labels)?;
    Ok(selector.matches(&labels))
}

/// Decodes `document_json`, converts it, decodes `labels_json`, and evaluates.
pub fn evaluate_document(document_json: &str, labels_json: &str) -> Result<bool, DocumentError> {
    let document = decode_document(document_json).map_err(DocumentError::Document)?;
    let selector = document
        .into_label_selector()
        .to_selector()
        .map_err(DocumentError::Conversion)?;
    let labels = decode_labels(labels_json).map_err(DocumentError::Labels)?;
    Ok(selector.matches(&labels))
}

/// Evaluates selector text against a JSON label set and returns a status code.
///
/// `0` match, `1` no match, `-1` invalid selector, `-2` invalid label set.
pub fn match_label(selector: &str, labels_json: &str) -> i32 {
    status(evaluate_text(selector, labels_json), "match_label")
}

/// Evaluates a JSON selector document against a JSON label set and returns a
/// status code.
///
/// `0` match, `1` no match, `-2` invalid document, `-3` invalid label set,
/// `-4` document does not describe a valid selector.
pub fn match_label_selector(document_json: &str, labels_json: &str) -> i32 {
    status(
        evaluate_document(document_json, labels_json),
        "match_label_selector",
    )
}

pub(crate) fn status<E>(result: Result<bool, E>, call: &'static str) -> i32
where
    E: StatusCode + std::fmt::Display,
{
    match result {
        Ok(matched) => codes::from_match(matched),
        Err(err) => {
            let code = err.code();
            tracing::debug!(call, code, error = %err, "selector evaluation failed");
            code
        }
    }
}
