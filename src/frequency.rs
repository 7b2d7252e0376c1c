//! Ordered frequency counts.
//!
//! A [`FrequencyTable`] keeps keys ordered by descending count. Keys with
//! equal counts keep the order in which they were first seen, so truncating
//! to the top N and picking a mode are both deterministic.

use serde::Serialize;
use std::collections::HashMap;

/// One key and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub key: String,
    pub count: usize,
}

/// Occurrence counts ordered by descending count, ties by first appearance
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// Count every value yielded by `values`
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut positions: HashMap<&'a str, usize> = HashMap::new();
        let mut entries: Vec<FrequencyEntry> = Vec::new();

        for value in values {
            match positions.get(value) {
                Some(&index) => entries[index].count += 1,
                None => {
                    positions.insert(value, entries.len());
                    entries.push(FrequencyEntry {
                        key: value.to_string(),
                        count: 1,
                    });
                }
            }
        }

        // Stable sort keeps first-seen order among equal counts
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        Self { entries }
    }

    /// Keep only the `n` highest entries
    pub fn truncated(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }

    /// Copy of the `n` highest entries
    pub fn top(&self, n: usize) -> Self {
        Self {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    /// Highest-count entry, earliest seen on a tie
    pub fn most_frequent(&self) -> Option<&FrequencyEntry> {
        self.entries.first()
    }

    /// Count recorded for `key`, if any
    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.count)
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrequencyEntry> {
        self.entries.iter()
    }

    /// Keys in table order
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }
}
