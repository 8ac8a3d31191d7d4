//! Host-process boundary for kubesel.
//!
//! A host hands over selector text or a selector document and a label set,
//! all as strings, and gets back a small integer. This crate decodes the
//! JSON, runs the [`kubesel`] engine, and maps every outcome onto the
//! status codes below. Decode failures stay here; the engine's own error
//! type never sees them.
//!
//! | Function | `0` | `1` | `-1` | `-2` | `-3` | `-4` |
//! |----------|-----|-----|------|------|------|------|
//! | [`match_label`] | match | no match | bad selector | bad labels | | |
//! | [`match_label_selector`] | match | no match | | bad document | bad labels | conversion failed |
//!
//! Both functions are also exported over the C ABI from [`exports`].
//!
//! ```
//! use kubesel_ffi::{match_label, match_label_selector, codes};
//!
//! assert_eq!(match_label("app=nginx", r#"{"app":"nginx"}"#), codes::MATCH);
//! assert_eq!(match_label("app ?? nginx", "{}"), codes::SELECTOR_ERROR);
//! assert_eq!(
//!     match_label_selector(
//!         r#"{"labelSelector":{"matchLabels":{"app":"nginx"}}}"#,
//!         r#"{"app":"envoy"}"#,
//!     ),
//!     codes::NO_MATCH,
//! );
//! ```

mod boundary;
pub mod codes;
mod error;
pub mod exports;

pub use boundary::{
    decode_document, decode_labels, evaluate_document, evaluate_text, match_label,
    match_label_selector, SelectorDocument,
};
pub use error::{DocumentError, StatusCode, TextError};
