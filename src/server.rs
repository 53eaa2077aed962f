//! MCP server exposing documentation lookups as tools.

use crate::service::LookupService;
use crate::tools::{
    RefreshSourceRequest, RtfmRequest, SourceInfoRequest, handle_list_sources, handle_refresh_source,
    handle_rtfm, handle_source_info,
};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server answering documentation queries
#[derive(Clone)]
pub struct RtfmServer {
    /// Shared lookup service (registry and caches)
    service: LookupService,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for RtfmServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RtfmServer")
            .field("service", &self.service)
            .finish()
    }
}

#[tool_router]
impl RtfmServer {
    pub fn new(service: LookupService) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    pub fn service(&self) -> &LookupService {
        &self.service
    }

    #[tool(
        description = "Look up a symbol in a documentation source. Python libraries are searched through their Sphinx inventory with fuzzy matching; Rust, C, C++ and Discord.js use the site's own search. Returns up to 8 markdown links. Without a query, returns the documentation's landing page.",
        input_schema = inline_schema_for_type::<RtfmRequest>()
    )]
    async fn rtfm(
        &self,
        Parameters(request): Parameters<RtfmRequest>,
    ) -> std::result::Result<String, String> {
        handle_rtfm(&self.service, request).await
    }

    #[tool(description = "List every documentation source that can be queried.")]
    async fn list_sources(&self) -> std::result::Result<String, String> {
        Ok(handle_list_sources(&self.service))
    }

    #[tool(description = "Show a documentation source's language, type, URL, and aliases.")]
    async fn source_info(
        &self,
        Parameters(request): Parameters<SourceInfoRequest>,
    ) -> std::result::Result<String, String> {
        handle_source_info(&self.service, &request)
    }

    #[tool(
        description = "Drop cached results for a documentation source so the next lookup fetches fresh data. Without a source, drops everything.",
        input_schema = inline_schema_for_type::<RefreshSourceRequest>()
    )]
    async fn refresh_source(
        &self,
        Parameters(request): Parameters<RefreshSourceRequest>,
    ) -> std::result::Result<String, String> {
        handle_refresh_source(&self.service, request).await
    }
}

#[tool_handler]
impl ServerHandler for RtfmServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "rtfm-mcp: Links into documentation for Python libraries, Rust, C, C++ and Discord.js. \
                 Use list_sources to see what can be queried, then rtfm with a source and a symbol name.",
            )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Sets `inline_subschemas` so optional fields render inline rather than as
/// `$ref` definitions.
fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.inline_subschemas = true;

    let schema = settings.into_generator().into_root_schema_for::<T>();
    match serde_json::to_value(schema) {
        Ok(serde_json::Value::Object(object)) => Arc::new(object),
        _ => Arc::new(JsonObject::new()),
    }
}
