// src/model/composition.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Atom counts per element symbol for one unit cell.
///
/// Symbols are case-sensitive and only present once observed, so an absent symbol reads as 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AtomCounts {
    counts: BTreeMap<String, usize>,
}

impl AtomCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, element: &str) {
        *self.counts.entry(element.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, element: &str) -> usize {
        self.counts.get(element).copied().unwrap_or(0)
    }

    pub fn contains(&self, element: &str) -> bool {
        self.counts.contains_key(element)
    }

    /// Total number of atoms over all elements
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct elements
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(el, n)| (el.as_str(), *n))
    }

    /// Space separated formula, e.g. "C8 H4 O5 Zn2"
    pub fn formula(&self) -> String {
        self.iter()
            .map(|(el, n)| format!("{}{}", el, n))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<S: AsRef<str>> FromIterator<(S, usize)> for AtomCounts {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (el, n) in iter {
            *counts.entry(el.as_ref().to_string()).or_insert(0) += n;
        }
        Self { counts }
    }
}
