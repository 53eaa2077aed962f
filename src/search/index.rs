//! Symbol key -> URL map built from one source's inventory.

use super::matcher::fuzzy_match;
use crate::types::{QueryResult, SymbolLink};
use ahash::AHashMap;

/// Immutable-once-published mapping from symbol key to absolute URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolIndex {
    /// Project name from the inventory header
    project: String,
    entries: AHashMap<String, String>,
}

impl SymbolIndex {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            entries: AHashMap::new(),
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// Insert or overwrite an entry.
    pub fn insert(&mut self, key: impl Into<String>, url: impl Into<String>) {
        self.entries.insert(key.into(), url.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Rank the index keys against `query`, keeping at most `limit` links.
    pub fn search(&self, query: &str, limit: usize) -> QueryResult {
        fuzzy_match(query, self.iter(), limit)
            .into_iter()
            .map(|(key, url)| SymbolLink::new(key, url))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SymbolIndex {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = Self::default();
        for (key, url) in iter {
            index.insert(key, url);
        }
        index
    }
}
