use anyhow::Context;
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use rtfm_mcp::cli::{Cli, Commands};
use rtfm_mcp::config::EngineConfig;
use rtfm_mcp::http::ReqwestFetcher;
use rtfm_mcp::registry::SourceRegistry;
use rtfm_mcp::server::RtfmServer;
use rtfm_mcp::service::LookupService;
use rtfm_mcp::tools::{format_outcome, format_source_info, handle_list_sources};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    rtfm_mcp::tracing::init(cli.json_logs);

    let config = EngineConfig::load(cli.config.as_deref())?;
    let service = build_service(&config)?;

    match cli.command() {
        Commands::Serve => serve(service).await,
        Commands::Lookup { doc, query } => {
            let query = query.join(" ");
            let outcome = service.lookup(doc, Some(&query)).await?;
            println!("{}", format_outcome(&outcome));
            Ok(())
        }
        Commands::Sources => {
            println!("{}", handle_list_sources(&service));
            Ok(())
        }
        Commands::Info { doc } => {
            let info = service.source_info(doc)?;
            print!("{}", format_source_info(&info));
            Ok(())
        }
    }
}

fn build_service(config: &EngineConfig) -> anyhow::Result<LookupService> {
    let registry = SourceRegistry::builtin_with(config.extra_sources())
        .context("Invalid documentation source catalog")?;
    let fetcher = ReqwestFetcher::new(config).context("Failed to build HTTP client")?;

    tracing::debug!("Loaded {} documentation sources", registry.len());

    Ok(LookupService::new(registry, Arc::new(fetcher), config.cache_settings())
        .with_max_results(config.max_results))
}

async fn serve(service: LookupService) -> anyhow::Result<()> {
    tracing::info!("Starting rtfm-mcp MCP server");

    let server = RtfmServer::new(service);
    let running = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    running.waiting().await?;
    Ok(())
}
