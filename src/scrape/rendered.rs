//! Script-rendered search page with a table of results.
//!
//! The results table only exists after the page's scripts have run, so the
//! page is fetched through [`Fetcher::fetch_rendered`](crate::fetch::Fetcher::fetch_rendered).
//! Expect seconds of latency from renderers.

use super::{encode_query, resolve_link};
use crate::types::{MAX_RESULTS, QueryResult, SymbolLink};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static RESULTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".search-results").expect("valid selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid selector"));
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("valid selector"));
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid selector"));
static SPAN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").expect("valid selector"));

pub(crate) fn search_url(base_url: &str, text: &str) -> String {
    format!("{}{}", base_url, encode_query(text))
}

/// Extract result rows from a rendered search page.
pub fn extract(html: &str, link_base: &str) -> QueryResult {
    let document = Html::parse_document(html);

    let Some(container) = document.select(&RESULTS).next() else {
        tracing::debug!("Rendered page has no search results container");
        return QueryResult::empty();
    };

    container
        .select(&ROW)
        .take(MAX_RESULTS)
        .filter_map(|row| extract_row(row, link_base))
        .collect()
}

fn extract_row(row: ElementRef<'_>, link_base: &str) -> Option<SymbolLink> {
    let cell = row.select(&CELL).next()?;
    let anchor = cell.select(&LINK).next()?;
    let url = resolve_link(link_base, anchor.value().attr("href")?)?;

    let mut label: String = cell.select(&SPAN).flat_map(|span| span.text()).collect();
    if label.trim().is_empty() {
        label = anchor.text().collect();
    }

    Some(SymbolLink::new(label.trim(), url))
}
