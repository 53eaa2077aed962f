//! Source catalog handlers: listing, details, and cache refresh.

use crate::service::{LookupService, SourceInfo};
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SourceInfoRequest {
    /// Documentation source name or alias (case-insensitive)
    pub doc: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RefreshSourceRequest {
    /// Documentation source name or alias; omit to drop every cached result
    #[serde(default)]
    pub doc: Option<String>,
}

pub fn handle_list_sources(service: &LookupService) -> String {
    format!(
        "These are the valid documentation sources (case-insensitive). \
         Use source_info to see a source's aliases.\n\n`{}`",
        service.list_sources().join("`, `")
    )
}

pub fn handle_source_info(service: &LookupService, request: &SourceInfoRequest) -> Result<String, String> {
    service
        .source_info(&request.doc)
        .map(|info| format_source_info(&info))
        .map_err(|e| e.to_string())
}

pub async fn handle_refresh_source(
    service: &LookupService,
    request: RefreshSourceRequest,
) -> Result<String, String> {
    let Some(doc) = request.doc else {
        service.refresh_all().await;
        return Ok("Dropped all cached documentation.".to_string());
    };

    let name = service.resolve(&doc).map_err(|e| e.to_string())?.name.clone();
    let dropped = service.refresh(&doc).await.map_err(|e| e.to_string())?;

    let mut output = format!("Refreshed {}.", name);
    if dropped.index {
        output.push_str(" The symbol index will be rebuilt on the next lookup.");
    }
    if dropped.queries > 0 {
        let _ = write!(output, " Dropped {} cached search result(s).", dropped.queries);
    }
    Ok(output)
}

pub fn format_source_info(info: &SourceInfo) -> String {
    let mut output = format!("# Documentation Info for {}\n\n", info.name);
    let _ = writeln!(output, "Language: {}", info.language);
    let _ = writeln!(output, "Type: {}", info.category);
    let _ = writeln!(output, "URL: {}", info.url);
    let _ = writeln!(output, "Search: {}", info.strategy);
    if !info.aliases.is_empty() {
        let _ = writeln!(output, "Aliases: `{}`", info.aliases.join("`, `"));
    }
    output
}
