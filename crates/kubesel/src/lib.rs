//! kubesel - label selector parsing and matching.
//!
//! Decides whether a set of key/value labels satisfies a selector, the
//! primitive behind "find every object whose labels satisfy
//! `app in (nginx)`". Selectors come either as text or as a structured
//! `matchLabels` + `matchExpressions` document; both end up as the same
//! [`Selector`].
//!
//! # Quick Start
//!
//! ```rust
//! use kubesel::{LabelSelector, LabelSet, Selector};
//!
//! let labels = LabelSet::new()
//!     .with("app", "nginx")
//!     .with("project", "nibiru");
//!
//! // Text form
//! let selector = Selector::parse("app in (nginx), !canary").unwrap();
//! assert!(selector.matches(&labels));
//!
//! // Structured form
//! let doc = LabelSelector::new().match_expression("app", "In", ["nginx"]);
//! assert!(doc.to_selector().unwrap().matches(&labels));
//! ```
//!
//! # Selector Syntax
//!
//! | Text | Operator | Holds when |
//! |------|----------|------------|
//! | `key` | `Exists` | key present |
//! | `!key` | `DoesNotExist` | key absent |
//! | `key=v`, `key==v` | `Equals`, `DoubleEquals` | value is `v` |
//! | `key!=v` | `NotEquals` | key absent or value is not `v` |
//! | `key in (a,b)` | `In` | value is `a` or `b` |
//! | `key notin (a,b)` | `NotIn` | key absent or value is neither |
//! | `key>n`, `key<n` | `GreaterThan`, `LessThan` | value is an integer and compares |
//!
//! Requirements are separated by commas and combined with AND. The empty
//! selector matches everything.
//!
//! # Label Syntax
//!
//! Keys are an optional DNS-subdomain prefix and `/`, then a name of at
//! most 63 characters. Values are at most 63 characters and may be empty.
//! Both the parser and the document converter apply the rules in
//! [`validation`].

mod document;
mod error;
mod labels;
pub mod lexer;
mod op;
mod parser;
mod requirement;
mod selector;
pub mod validation;

// Re-export public API
pub use document::{LabelSelector, LabelSelectorRequirement};
pub use error::{Result, SelectorError, ValidationTarget};
pub use labels::{LabelSet, Labels};
pub use op::Operator;
pub use parser::parse;
pub use requirement::Requirement;
pub use selector::Selector;
