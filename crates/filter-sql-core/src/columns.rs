//! Mapping from filter identifiers to SQL column references.

use std::collections::HashMap;

use serde::Deserialize;

/// Read-only lookup from a lowercased filter identifier (e.g. `cpus`) to the
/// SQL expression that should replace it (e.g. `i."CPUs"`).
///
/// The map is owned by the caller; compilation only ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "HashMap<String, String>")]
pub struct ColumnMap {
    columns: HashMap<String, String>,
}

impl ColumnMap {
    /// Creates an empty column map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mapping. The identifier is stored lowercased.
    pub fn insert(&mut self, identifier: impl AsRef<str>, column: impl Into<String>) {
        self.columns
            .insert(identifier.as_ref().to_lowercase(), column.into());
    }

    /// Returns the column reference for `identifier`, ignoring case.
    #[must_use]
    pub fn resolve(&self, identifier: &str) -> Option<&str> {
        self.columns
            .get(&identifier.to_lowercase())
            .map(String::as_str)
    }

    /// Number of mapped identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl From<HashMap<String, String>> for ColumnMap {
    fn from(columns: HashMap<String, String>) -> Self {
        columns.into_iter().collect()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for ColumnMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (identifier, column) in iter {
            map.insert(identifier, column);
        }
        map
    }
}
