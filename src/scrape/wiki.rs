//! MediaWiki site search shared by two sibling languages.
//!
//! The results page lists matches for each language in its own
//! `ul.mw-search-results` block; a source picks its block by position.

use super::{encode_query, resolve_link};
use crate::types::{MAX_RESULTS, QueryResult, SymbolLink};
use scraper::{Html, Selector};
use std::sync::LazyLock;

static SECTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul.mw-search-results").expect("valid selector"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid selector"));

pub(crate) fn search_url(base_url: &str, text: &str) -> String {
    format!("{}?title=Special:Search&search={}", base_url, encode_query(text))
}

/// Extract the anchors of result block `section`.
pub fn extract(html: &str, section: usize, link_base: &str) -> QueryResult {
    let document = Html::parse_document(html);

    let Some(list) = document.select(&SECTION).nth(section) else {
        tracing::debug!("Wiki search page has no result section {}", section);
        return QueryResult::empty();
    };

    list.select(&ANCHOR)
        .take(MAX_RESULTS)
        .filter_map(|anchor| {
            let url = resolve_link(link_base, anchor.value().attr("href")?)?;
            let label: String = anchor.text().collect();
            Some(SymbolLink::new(label.trim(), url))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    const LINK_BASE: &str = "https://en.cppreference.com/";

    const PAGE: &str = r#"
        <html><body>
          <h2>C++</h2>
          <ul class="mw-search-results">
            <li><a href="/w/cpp/io/c/fprintf">std::printf, std::fprintf</a></li>
            <li><a href="/w/cpp/utility/format/print">std::print</a></li>
          </ul>
          <h2>C</h2>
          <ul class="mw-search-results">
            <li><a href="/w/c/io/fprintf">printf, fprintf</a></li>
          </ul>
        </body></html>"#;

    #[test]
    fn test_first_section() {
        let result = extract(PAGE, 0, LINK_BASE);
        check!(result.len() == 2);
        check!(result.links()[0] == SymbolLink::new("std::printf, std::fprintf", "https://en.cppreference.com/w/cpp/io/c/fprintf"));
    }

    #[test]
    fn test_second_section() {
        let result = extract(PAGE, 1, LINK_BASE);
        check!(result.len() == 1);
        check!(result.links()[0].url == "https://en.cppreference.com/w/c/io/fprintf");
    }

    #[test]
    fn test_missing_section_is_empty() {
        check!(extract(PAGE, 2, LINK_BASE).is_empty());
        check!(extract("<html><body>There were no results</body></html>", 0, LINK_BASE).is_empty());
    }

    #[test]
    fn test_anchors_capped() {
        let items: String = (0..20)
            .map(|i| format!(r#"<li><a href="/w/cpp/item{i}">item{i}</a></li>"#))
            .collect();
        let html = format!(r#"<ul class="mw-search-results">{items}</ul>"#);
        check!(extract(&html, 0, LINK_BASE).len() == MAX_RESULTS);
    }
}
