//! Label sets and the lookup trait used by the matcher.
//!
//! Matching only needs two questions answered about an object's labels:
//! is a key present, and what is its value. The [`Labels`] trait captures
//! exactly that, so selectors can run against [`LabelSet`] or against the
//! plain maps callers already hold.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Read-only access to a set of labels.
///
/// # Manual Implementation
///
/// ```
/// use kubesel::{Labels, Selector};
///
/// struct Pod {
///     app: String,
/// }
///
/// impl Labels for Pod {
///     fn get(&self, key: &str) -> Option<&str> {
///         match key {
///             "app" => Some(self.app.as_str()),
///             _ => None,
///         }
///     }
/// }
///
/// let selector = Selector::parse("app=nginx").unwrap();
/// assert!(selector.matches(&Pod { app: "nginx".into() }));
/// ```
pub trait Labels {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<&str>;

    /// Returns `true` if `key` is present.
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl<L: Labels + ?Sized> Labels for &L {
    fn get(&self, key: &str) -> Option<&str> {
        (**self).get(key)
    }
}

impl<S: std::hash::BuildHasher> Labels for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

impl Labels for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        BTreeMap::get(self, key).map(String::as_str)
    }
}

/// An owned, unordered mapping from label keys to label values.
///
/// Serializes as a flat JSON object: `{"app": "nginx", "tier": "web"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(BTreeMap<String, String>);

impl LabelSet {
    /// Creates an empty label set.
    pub fn new() -> Self {
        LabelSet::default()
    }

    /// Adds a label, returning the updated set.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Inserts a label, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the number of labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set holds no labels.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Consumes the set, returning the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl Labels for LabelSet {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        LabelSet(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for LabelSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        LabelSet(map)
    }
}

impl<S: std::hash::BuildHasher> From<HashMap<String, String, S>> for LabelSet {
    fn from(map: HashMap<String, String, S>) -> Self {
        map.into_iter().collect()
    }
}

impl fmt::Display for LabelSet {
    /// Renders as `key=value` pairs in key order, comma-separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}
