//! Shared test fixtures for integration tests.
//!
//! # Available Fixtures
//!
//! - `stub`: a [`StubFetcher`] preloaded with the demo inventory and search pages
//! - `service`: a [`LookupService`] over [`demo_registry`] backed by `stub`
//!
//! [`StubFetcher`] counts every request per URL so tests can assert how often
//! the engine went to the network.

#![allow(dead_code)] // Helpers used across different integration test crates

use async_trait::async_trait;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use rstest::fixture;
use rtfm_mcp::fetch::{FetchResponse, Fetcher};
use rtfm_mcp::inventory::INVENTORY_MAGIC;
use rtfm_mcp::registry::{AdapterKind, Category, SourceDescriptor, SourceRegistry};
use rtfm_mcp::{CacheSettings, LookupError, LookupService};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const DEMO_BASE: &str = "https://docs.demo.test/en/latest";
pub const DEMO_INVENTORY: &str = "https://docs.demo.test/en/latest/objects.inv";
pub const API_BASE: &str = "https://api.demo.test/search?q=";
pub const WIKI_BASE: &str = "https://wiki.demo.test/w/cpp";
pub const RENDERED_BASE: &str = "https://rendered.demo.test/std/?search=";

/// Build an inventory file from raw record lines.
pub fn inventory(project: &str, records: &[&str]) -> Vec<u8> {
    let mut out = format!(
        "{}\n# Project: {}\n# Version: 1.0\n# The remainder of this file is compressed using zlib.\n",
        INVENTORY_MAGIC, project
    )
    .into_bytes();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    for record in records {
        encoder.write_all(record.as_bytes()).unwrap();
        encoder.write_all(b"\n").unwrap();
    }
    out.extend(encoder.finish().unwrap());
    out
}

/// The inventory served for the demo source.
pub fn demo_inventory() -> Vec<u8> {
    inventory(
        "demo",
        &[
            "demo py:module 0 index.html#module-$ -",
            "demo.Client py:class 1 api.html#$ -",
            "demo.Client.run py:method 1 api.html#$ -",
            "demo.getcontext py:function 1 api.html#$ -",
            "demo.settings py:data 1 api.html#$ -",
            "intro std:doc -1 intro.html Introduction",
        ],
    )
}

/// A canned response.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Fetch collaborator serving canned responses and counting requests.
#[derive(Debug, Default)]
pub struct StubFetcher {
    routes: Mutex<HashMap<String, Canned>>,
    hits: Mutex<HashMap<String, usize>>,
    rendered: Mutex<HashMap<String, usize>>,
    delay: Mutex<Option<Duration>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) {
        self.routes.lock().unwrap().insert(
            url.into(),
            Canned {
                status,
                body: body.into(),
            },
        );
    }

    /// Delay every response, simulating a slow network.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Requests made for `url`.
    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    /// Requests for `url` that asked for a script-rendered page.
    pub fn rendered_hits(&self, url: &str) -> usize {
        self.rendered.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    /// Requests made in total.
    pub fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }

    async fn respond(&self, url: &str) -> rtfm_mcp::Result<FetchResponse<Vec<u8>>> {
        *self.hits.lock().unwrap().entry(url.to_string()).or_default() += 1;

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let canned = self.routes.lock().unwrap().get(url).cloned();
        match canned {
            Some(Canned { status, body }) => Ok(FetchResponse::new(status, body)),
            None => Err(LookupError::Transport(format!("no route for {}", url))),
        }
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch_bytes(&self, url: &str) -> rtfm_mcp::Result<FetchResponse<Vec<u8>>> {
        self.respond(url).await
    }

    async fn fetch_text(&self, url: &str) -> rtfm_mcp::Result<FetchResponse<String>> {
        let FetchResponse { status, body } = self.respond(url).await?;
        Ok(FetchResponse::new(status, String::from_utf8_lossy(&body).into_owned()))
    }

    async fn fetch_json(&self, url: &str) -> rtfm_mcp::Result<FetchResponse<serde_json::Value>> {
        let FetchResponse { status, body } = self.respond(url).await?;
        let value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        Ok(FetchResponse::new(status, value))
    }

    async fn fetch_rendered(&self, url: &str) -> rtfm_mcp::Result<FetchResponse<String>> {
        *self.rendered.lock().unwrap().entry(url.to_string()).or_default() += 1;
        self.fetch_text(url).await
    }
}

/// One source per strategy.
pub fn demo_registry() -> SourceRegistry {
    SourceRegistry::new([
        SourceDescriptor::inventory("Demo", DEMO_BASE)
            .aliases(["dm", "demo-lib"])
            .category(Category::Library),
        SourceDescriptor::scrape("DemoAPI", API_BASE, AdapterKind::StructuredApi)
            .aliases(["dapi"])
            .language("JavaScript")
            .display_url("https://api.demo.test/"),
        SourceDescriptor::scrape(
            "DemoWiki",
            WIKI_BASE,
            AdapterKind::WikiSearch {
                section: 0,
                link_base: "https://wiki.demo.test/".to_string(),
            },
        )
        .language("C++")
        .category(Category::Language),
        SourceDescriptor::scrape(
            "DemoRendered",
            RENDERED_BASE,
            AdapterKind::RenderedSearch {
                link_base: "https://rendered.demo.test/".to_string(),
            },
        )
        .aliases(["drs"])
        .language("Rust")
        .category(Category::Language)
        .display_url("https://rendered.demo.test/std/all.html"),
    ])
    .unwrap()
}

pub fn api_url(text: &str) -> String {
    format!("{}{}", API_BASE, text)
}

pub fn wiki_url(text: &str) -> String {
    format!("{}?title=Special:Search&search={}", WIKI_BASE, text)
}

pub fn rendered_url(text: &str) -> String {
    format!("{}{}", RENDERED_BASE, text)
}

pub fn api_body(links: &[(&str, &str)]) -> String {
    let description: Vec<String> = links
        .iter()
        .map(|(label, url)| format!(":regional_indicator_c: **[{}]({})**", label, url))
        .collect();
    serde_json::json!({ "description": description.join("\n") }).to_string()
}

#[fixture]
pub fn stub() -> Arc<StubFetcher> {
    let stub = StubFetcher::new();
    stub.route(DEMO_INVENTORY, 200, demo_inventory());
    stub.route(
        api_url("Client"),
        200,
        api_body(&[
            ("Client", "https://api.demo.test/class/Client"),
            ("Client#login", "https://api.demo.test/class/Client?scrollTo=login"),
        ]),
    );
    stub.route(
        wiki_url("printf"),
        200,
        r#"<ul class="mw-search-results"><li><a href="/w/cpp/io/c/fprintf">std::printf</a></li></ul>"#,
    );
    stub.route(wiki_url("nothing"), 200, "<p>There were no results matching the query.</p>");
    stub.route(
        rendered_url("Vec"),
        200,
        r#"<div class="search-results"><table>
             <tr><td><a href="../std/vec/struct.Vec.html"><span>std::vec::</span><span>Vec</span></a></td></tr>
             <tr><td><a href="../std/macro.vec.html"><span>std::</span><span>vec</span></a></td></tr>
           </table></div>"#,
    );
    Arc::new(stub)
}

#[fixture]
pub fn service(stub: Arc<StubFetcher>) -> (LookupService, Arc<StubFetcher>) {
    let fetcher: Arc<dyn Fetcher> = stub.clone();
    let service = LookupService::new(demo_registry(), fetcher, CacheSettings::default());
    (service, stub)
}
