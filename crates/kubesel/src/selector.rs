//! Selectors: AND-combinations of requirements.
//!
//! A [`Selector`] is immutable. [`Selector::add`] returns a new selector
//! that shares every existing requirement with the original, so building a
//! family of selectors from a common base never copies the base.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::error::{Result, SelectorError};
use crate::labels::Labels;
use crate::parser;
use crate::requirement::Requirement;

/// Node of the persistent requirement list, newest first.
struct Link {
    requirement: Requirement,
    parent: Option<Arc<Link>>,
    len: usize,
}

/// An immutable, ordered set of requirements that must all hold.
///
/// The empty selector matches every label set.
///
/// # Example
///
/// ```
/// use kubesel::{LabelSet, Requirement, Selector};
///
/// let base = Selector::parse("app in (nginx, envoy)").unwrap();
/// let narrowed = base.add(Requirement::not_equals("app", "envoy").unwrap());
///
/// let labels = LabelSet::new().with("app", "envoy");
/// assert!(base.matches(&labels));
/// assert!(!narrowed.matches(&labels));
/// assert_eq!(narrowed.to_string(), "app in (envoy,nginx),app!=envoy");
/// ```
#[derive(Clone, Default)]
pub struct Selector {
    head: Option<Arc<Link>>,
}

impl Selector {
    /// Creates an empty selector.
    pub fn new() -> Self {
        Selector::default()
    }

    /// The selector that matches everything (same as [`Selector::new`]).
    pub fn everything() -> Self {
        Selector::default()
    }

    /// Parses selector text. See [`crate::parse`].
    pub fn parse(input: &str) -> Result<Self> {
        parser::parse(input)
    }

    /// Returns a new selector with `requirement` appended.
    pub fn add(&self, requirement: Requirement) -> Selector {
        let len = self.len() + 1;
        Selector {
            head: Some(Arc::new(Link {
                requirement,
                parent: self.head.clone(),
                len,
            })),
        }
    }

    /// Returns a new selector with every requirement from `iter` appended.
    pub fn add_all<I>(&self, iter: I) -> Selector
    where
        I: IntoIterator<Item = Requirement>,
    {
        iter.into_iter()
            .fold(self.clone(), |selector, requirement| selector.add(requirement))
    }

    /// Returns the number of requirements.
    pub fn len(&self) -> usize {
        self.head.as_ref().map_or(0, |link| link.len)
    }

    /// Returns `true` if this selector has no requirements.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Newest-first walk over the list.
    fn iter_rev(&self) -> impl Iterator<Item = &Requirement> {
        std::iter::successors(self.head.as_deref(), |&link| link.parent.as_deref())
            .map(|link| &link.requirement)
    }

    /// Returns the requirements in insertion order.
    pub fn requirements(&self) -> Vec<&Requirement> {
        let mut requirements: Vec<&Requirement> = self.iter_rev().collect();
        requirements.reverse();
        requirements
    }

    /// Iterates over the requirements in insertion order.
    ///
    /// The list is stored newest first, so this collects into a `Vec`
    /// before iterating. [`Selector::matches`] walks the list in place.
    pub fn iter(&self) -> std::vec::IntoIter<&Requirement> {
        self.requirements().into_iter()
    }

    /// Returns `true` if every requirement holds for `labels`.
    ///
    /// Stops at the first requirement that does not hold.
    pub fn matches<L: Labels + ?Sized>(&self, labels: &L) -> bool {
        self.iter_rev().all(|requirement| requirement.matches(labels))
    }

    /// Returns references to the items whose labels match, in input order.
    pub fn filter<'a, T: Labels>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }

    /// Counts the items whose labels match.
    pub fn count<T: Labels>(&self, items: &[T]) -> usize {
        items.iter().filter(|item| self.matches(*item)).count()
    }
}

impl Drop for Selector {
    // Unlink iteratively so dropping a long selector cannot overflow the stack.
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(link) = next {
            match Arc::try_unwrap(link) {
                Ok(mut link) => next = link.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter_rev().eq(other.iter_rev())
    }
}

impl Eq for Selector {}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for Selector {
    /// Canonical text: requirements in insertion order, comma-separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, requirement) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{requirement}")?;
        }
        Ok(())
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse(s)
    }
}

impl FromIterator<Requirement> for Selector {
    fn from_iter<I: IntoIterator<Item = Requirement>>(iter: I) -> Self {
        Selector::new().add_all(iter)
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
