//! Address-to-location resolution against the canonical address table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical address table mapping matrix indices to address text.
///
/// Resolution is a case-sensitive substring test in ascending index order:
/// the first entry that contains the query wins, even when a later entry
/// would be a closer match. No trimming or case folding is applied.
///
/// # Examples
///
/// ```
/// use hub_dispatch::distance::LocationIndex;
///
/// let index = LocationIndex::from_entries([
///     (0, "Western Governors University, 4001 South 700 East".to_string()),
///     (1, "International Peace Gardens, 1060 Dalton Ave S".to_string()),
/// ]);
/// assert_eq!(index.resolve("1060 Dalton Ave S"), Some(1));
/// assert_eq!(index.resolve("1060 dalton ave s"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationIndex {
    entries: Vec<(usize, String)>,
}

impl LocationIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from `(index, canonical text)` pairs.
    ///
    /// Entries are kept sorted by index so resolution order does not depend
    /// on input order. A repeated index keeps its last text.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, String)>,
    {
        let entries: BTreeMap<usize, String> = entries.into_iter().collect();
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Resolves an address to the first canonical index containing it.
    pub fn resolve(&self, address: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(_, text)| text.contains(address))
            .map(|(i, _)| *i)
    }

    /// Canonical text for a location index.
    pub fn address(&self, index: usize) -> Option<&str> {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .ok()
            .map(|pos| self.entries[pos].1.as_str())
    }

    /// Number of canonical entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
