//! Per-category set collection with union-merge accumulation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::IntelligenceCategory;

/// Normalized intelligence values grouped by category.
///
/// Each category holds a mathematical set: no duplicates, insertion order
/// irrelevant. The only mutation across turns is `union`, which is
/// commutative and idempotent, so replayed or reordered turns converge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntelligenceSet {
    entries: BTreeMap<IntelligenceCategory, BTreeSet<String>>,
}

impl IntelligenceSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a normalized value. Returns true if it was not present.
    pub fn insert(&mut self, category: IntelligenceCategory, value: impl Into<String>) -> bool {
        self.entries.entry(category).or_default().insert(value.into())
    }

    /// Absorbs every value from `other`. Returns how many were new.
    pub fn union(&mut self, other: &IntelligenceSet) -> usize {
        let mut added = 0;
        for (category, values) in &other.entries {
            let target = self.entries.entry(*category).or_default();
            for value in values {
                if target.insert(value.clone()) {
                    added += 1;
                }
            }
        }
        added
    }

    /// Values accumulated for one category.
    pub fn values(&self, category: IntelligenceCategory) -> Option<&BTreeSet<String>> {
        self.entries.get(&category)
    }

    /// True if the category has at least one value.
    pub fn is_populated(&self, category: IntelligenceCategory) -> bool {
        self.entries.get(&category).is_some_and(|v| !v.is_empty())
    }

    /// True if a specific value is present.
    pub fn contains(&self, category: IntelligenceCategory, value: &str) -> bool {
        self.entries
            .get(&category)
            .is_some_and(|v| v.contains(value))
    }

    /// Total number of values across all categories.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    /// True when no category holds any value.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeSet::is_empty)
    }

    /// Categories that currently hold at least one value.
    pub fn populated_categories(&self) -> Vec<IntelligenceCategory> {
        self.entries
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(c, _)| *c)
            .collect()
    }

    /// Iterates over (category, values) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&IntelligenceCategory, &BTreeSet<String>)> {
        self.entries.iter()
    }
}
