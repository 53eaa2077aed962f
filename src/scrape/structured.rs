//! Documentation-proxy JSON endpoint.
//!
//! The proxy answers with an embed-like object whose `description` is a block
//! of lines such as `<icon> : **[Client#login](https://...)**`.

use super::encode_query;
use crate::types::{MAX_RESULTS, QueryResult, SymbolLink};
use serde_json::Value;

pub(crate) fn search_url(base_url: &str, text: &str) -> String {
    format!("{}{}", base_url, encode_query(text))
}

/// Extract links from a proxy response. A missing or empty description means no results.
pub fn extract(body: &Value) -> QueryResult {
    let Some(description) = body.get("description").and_then(Value::as_str) else {
        tracing::debug!("Structured response has no description block");
        return QueryResult::empty();
    };

    description
        .lines()
        .take(MAX_RESULTS)
        .filter_map(|line| {
            let link = parse_line(line);
            if link.is_none() {
                tracing::debug!("Skipping unrecognised result line: {}", line);
            }
            link
        })
        .collect()
}

fn parse_line(line: &str) -> Option<SymbolLink> {
    let (_, rest) = line.split_once(": **[")?;
    let (label, url) = rest.trim_matches('*').split_once("](")?;
    Some(SymbolLink::new(label, url.trim_end_matches(')')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use serde_json::json;

    #[test]
    fn test_extract_links() {
        let body = json!({
            "description": ":class: **[Client](https://discord.js.org/#/docs/main/stable/class/Client)**\n\
                            :method: **[Client#login](https://discord.js.org/#/docs/main/stable/class/Client?scrollTo=login)**"
        });
        let result = extract(&body);
        check!(result.len() == 2);
        check!(result.links()[0] == SymbolLink::new("Client", "https://discord.js.org/#/docs/main/stable/class/Client"));
        check!(result.links()[1].label == "Client#login");
        check!(result.links()[1].url.ends_with("scrollTo=login"));
    }

    #[test]
    fn test_extract_caps_lines() {
        let description: Vec<String> = (0..12)
            .map(|i| format!(":x: **[Item{i}](https://x/{i})**"))
            .collect();
        let body = json!({ "description": description.join("\n") });
        check!(extract(&body).len() == MAX_RESULTS);
    }

    #[test]
    fn test_missing_or_null_body_is_empty() {
        check!(extract(&Value::Null).is_empty());
        check!(extract(&json!({})).is_empty());
        check!(extract(&json!({ "description": 5 })).is_empty());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let body = json!({
            "description": "No results for that query\n:x: **[Good](https://x/good)**"
        });
        let result = extract(&body);
        check!(result.len() == 1);
        check!(result.links()[0].label == "Good");
    }
}
