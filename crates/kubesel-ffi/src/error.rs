//! Error types for the host boundary.

use kubesel::SelectorError;

use crate::codes;

/// Maps a boundary error onto its integer status code.
pub trait StatusCode {
    /// Returns the negative status code for this error.
    fn code(&self) -> i32;
}

/// Failures of [`evaluate_text`](crate::evaluate_text).
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// Selector text failed to parse or validate.
    #[error("invalid selector: {0}")]
    Selector(#[source] SelectorError),

    /// Selector text was not valid UTF-8 or was missing.
    #[error("selector text is missing or not valid UTF-8")]
    SelectorText,

    /// Label set JSON failed to decode.
    #[error("invalid label set: {0}")]
    Labels(#[source] serde_json::Error),

    /// Label set text was not valid UTF-8 or was missing.
    #[error("label set is missing or not valid UTF-8")]
    LabelsText,
}

impl StatusCode for TextError {
    fn code(&self) -> i32 {
        match self {
            TextError::Selector(_) | TextError::SelectorText => codes::SELECTOR_ERROR,
            TextError::Labels(_) | TextError::LabelsText => codes::LABELS_DECODE_ERROR,
        }
    }
}

/// Failures of [`evaluate_document`](crate::evaluate_document).
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Selector document JSON failed to decode.
    #[error("invalid selector document: {0}")]
    Document(#[source] serde_json::Error),

    /// Selector document text was not valid UTF-8 or was missing.
    #[error("selector document is missing or not valid UTF-8")]
    DocumentText,

    /// Label set JSON failed to decode.
    #[error("invalid label set: {0}")]
    Labels(#[source] serde_json::Error),

    /// Label set text was not valid UTF-8 or was missing.
    #[error("label set is missing or not valid UTF-8")]
    LabelsText,

    /// The document decoded but does not describe a valid selector.
    #[error("cannot convert selector document: {0}")]
    Conversion(#[source] SelectorError),
}

impl StatusCode for DocumentError {
    fn code(&self) -> i32 {
        match self {
            DocumentError::Document(_) | DocumentError::DocumentText => {
                codes::DOCUMENT_DECODE_ERROR
            }
            DocumentError::Labels(_) | DocumentError::LabelsText => {
                codes::DOCUMENT_LABELS_DECODE_ERROR
            }
            DocumentError::Conversion(_) => codes::CONVERSION_ERROR,
        }
    }
}
