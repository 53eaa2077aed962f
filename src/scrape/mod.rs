//! Live search adapters for sources without an inventory.
//!
//! Each adapter fetches one search page (or JSON document) and extracts up to
//! [`MAX_RESULTS`](crate::types::MAX_RESULTS) links from it. Transport
//! problems and non-2xx statuses are errors. A response that lacks the
//! expected structure is not: it is logged and treated as "no results".

pub(crate) mod rendered;
pub(crate) mod structured;
pub(crate) mod wiki;

use crate::error::Result;
use crate::fetch::Fetcher;
use crate::registry::{AdapterKind, SourceDescriptor};
use crate::types::QueryResult;
use url::Url;

impl AdapterKind {
    /// The URL queried for `text` on `source`.
    pub fn search_url(&self, source: &SourceDescriptor, text: &str) -> String {
        match self {
            Self::StructuredApi => structured::search_url(&source.base_url, text),
            Self::RenderedSearch { .. } => rendered::search_url(&source.base_url, text),
            Self::WikiSearch { .. } => wiki::search_url(&source.base_url, text),
        }
    }

    /// Run `text` against the live endpoint of `source`.
    pub async fn query(
        &self,
        fetcher: &dyn Fetcher,
        source: &SourceDescriptor,
        text: &str,
    ) -> Result<QueryResult> {
        let url = self.search_url(source, text);
        tracing::debug!("Querying {} via {} adapter: {}", source.name, self.name(), url);

        match self {
            Self::StructuredApi => {
                let body = fetcher.fetch_json(&url).await?.into_success(&url)?;
                Ok(structured::extract(&body))
            }
            Self::RenderedSearch { link_base } => {
                let html = fetcher.fetch_rendered(&url).await?.into_success(&url)?;
                Ok(rendered::extract(&html, link_base))
            }
            Self::WikiSearch { section, link_base } => {
                let html = fetcher.fetch_text(&url).await?.into_success(&url)?;
                Ok(wiki::extract(&html, *section, link_base))
            }
        }
    }
}

/// Percent-encode query text for use in a URL query string.
pub(crate) fn encode_query(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.trim().as_bytes()).collect()
}

/// Resolve a scraped `href` against `base`.
pub(crate) fn resolve_link(base: &str, href: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("Vec", "Vec")]
    #[case("hash map", "hash+map")]
    #[case("a&b=c", "a%26b%3Dc")]
    #[case("  std::fs  ", "std%3A%3Afs")]
    fn test_encode_query(#[case] input: &str, #[case] expected: &str) {
        check!(encode_query(input) == expected);
    }

    #[rstest]
    #[case("https://doc.rust-lang.org/", "../std/vec/struct.Vec.html", "https://doc.rust-lang.org/std/vec/struct.Vec.html")]
    #[case("https://en.cppreference.com/", "/w/cpp/io/c/printf", "https://en.cppreference.com/w/cpp/io/c/printf")]
    #[case("https://en.cppreference.com/", "https://other.org/x", "https://other.org/x")]
    fn test_resolve_link(#[case] base: &str, #[case] href: &str, #[case] expected: &str) {
        check!(resolve_link(base, href).as_deref() == Some(expected));
    }

    #[test]
    fn test_search_urls() {
        let registry = crate::registry::SourceRegistry::builtin().unwrap();

        let cpp = registry.resolve("cpp").unwrap();
        let crate::registry::Strategy::Scrape(kind) = &cpp.strategy else {
            panic!("C++ is scrape-backed");
        };
        check!(kind.search_url(cpp, "printf") == "https://cppreference.com/w/cpp?title=Special:Search&search=printf");

        let rust = registry.resolve("rust").unwrap();
        let crate::registry::Strategy::Scrape(kind) = &rust.strategy else {
            panic!("Rust is scrape-backed");
        };
        check!(kind.search_url(rust, "Vec") == "https://doc.rust-lang.org/std/?search=Vec");
    }
}
