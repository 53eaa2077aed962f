//! Documentation lookup handler.

use crate::error::LookupError;
use crate::service::LookupService;
use crate::types::{LookupOutcome, QueryResult};
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

/// Shown when a query matched nothing.
pub const NOTHING_FOUND: &str = "Your query returned no results.";

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RtfmRequest {
    /// Documentation source name or alias (case-insensitive), e.g. "python", "dpy", "rust", "cpp"
    pub doc: String,
    /// Symbol to look up; omit to get the documentation's landing page
    #[serde(default)]
    pub query: Option<String>,
}

/// Execute a lookup and render it as markdown.
pub async fn handle_rtfm(service: &LookupService, request: RtfmRequest) -> Result<String, String> {
    match service.lookup(&request.doc, request.query.as_deref()).await {
        Ok(outcome) => Ok(format_outcome(&outcome)),
        Err(e @ LookupError::NotFound { .. }) => Err(format!(
            "{}\n\nUse list_sources to see every available documentation source.",
            e
        )),
        Err(e) => {
            tracing::warn!("Lookup in {} failed: {}", request.doc, e);
            Err(format!("Looks like something went wrong: {}", e))
        }
    }
}

pub fn format_outcome(outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::Info { url, .. } => url.clone(),
        LookupOutcome::Matches { result, .. } => format_links(result),
    }
}

/// One markdown link per line, or [`NOTHING_FOUND`].
pub fn format_links(result: &QueryResult) -> String {
    if result.is_empty() {
        return NOTHING_FOUND.to_string();
    }

    let mut output = String::new();
    for link in result {
        let _ = writeln!(output, "{}", link);
    }
    output.truncate(output.trim_end().len());
    output
}
