use std::fmt;

/// Upper bound on the number of links a single lookup returns.
pub const MAX_RESULTS: usize = 8;

/// A labelled link to one documentation entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolLink {
    pub label: String,
    pub url: String,
}

impl SymbolLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for SymbolLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[`{}`]({})", self.label, self.url)
    }
}

/// Ordered lookup result holding at most [`MAX_RESULTS`] links.
///
/// An empty result is a normal outcome meaning "no match".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    links: Vec<SymbolLink>,
}

impl QueryResult {
    /// Builds a result, keeping only the first [`MAX_RESULTS`] links.
    pub fn new(links: impl IntoIterator<Item = SymbolLink>) -> Self {
        Self {
            links: links.into_iter().take(MAX_RESULTS).collect(),
        }
    }

    pub const fn empty() -> Self {
        Self { links: Vec::new() }
    }

    pub fn links(&self) -> &[SymbolLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SymbolLink> {
        self.links.iter()
    }

    /// Returns the result truncated to `limit` links.
    pub fn truncated(mut self, limit: usize) -> Self {
        self.links.truncate(limit);
        self
    }
}

impl FromIterator<SymbolLink> for QueryResult {
    fn from_iter<I: IntoIterator<Item = SymbolLink>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl IntoIterator for QueryResult {
    type Item = SymbolLink;
    type IntoIter = std::vec::IntoIter<SymbolLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryResult {
    type Item = &'a SymbolLink;
    type IntoIter = std::slice::Iter<'a, SymbolLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

/// What a lookup resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// No query text was given: the source's informational URL.
    Info { source: String, url: String },
    /// Ranked matches for the query (possibly empty).
    Matches { source: String, result: QueryResult },
}

impl LookupOutcome {
    /// Canonical name of the source that answered.
    pub fn source(&self) -> &str {
        match self {
            Self::Info { source, .. } | Self::Matches { source, .. } => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_query_result_is_capped() {
        let links = (0..20).map(|i| SymbolLink::new(format!("item{i}"), format!("https://x/{i}")));
        let result = QueryResult::new(links);
        check!(result.len() == MAX_RESULTS);
        check!(result.links()[0].label == "item0");
    }

    #[test]
    fn test_link_display() {
        let link = SymbolLink::new("Client", "https://example.com/api.html#Client");
        check!(link.to_string() == "[`Client`](https://example.com/api.html#Client)");
    }
}
