//! Engine configuration loaded from TOML.
//!
//! Lookup order: an explicit path, then `$RTFM_MCP_CONFIG`, then
//! `<config dir>/rtfm-mcp/config.toml`. A missing default file means defaults.

use crate::cache::CacheSettings;
use crate::inventory::DEFAULT_CHUNK_SIZE;
use crate::registry::{Category, SourceDescriptor};
use crate::types::MAX_RESULTS;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::borrow::Cow;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "RTFM_MCP_CONFIG";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Links returned per lookup (1..=8)
    pub max_results: usize,
    /// Scrape results kept before least-recently-used eviction
    pub scrape_cache_capacity: usize,
    /// Seconds a scrape result stays valid; unset keeps results until evicted
    pub scrape_cache_ttl_secs: Option<u64>,
    /// Read size used while inflating inventories
    pub decode_chunk_size: usize,
    /// Per-request timeout for the HTTP fetcher
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Extra inventory-backed sources
    pub sources: Vec<SourceConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULTS,
            scrape_cache_capacity: 512,
            scrape_cache_ttl_secs: None,
            decode_chunk_size: DEFAULT_CHUNK_SIZE,
            request_timeout_secs: 30,
            user_agent: concat!("rtfm-mcp/", env!("CARGO_PKG_VERSION")).to_string(),
            sources: Vec::new(),
        }
    }
}

/// An additional inventory-backed source declared in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub display_url: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub strip_namespaces: Vec<String>,
}

fn default_language() -> String {
    "Python".to_string()
}

impl From<SourceConfig> for SourceDescriptor {
    fn from(config: SourceConfig) -> Self {
        let mut source = Self::inventory(config.name, config.url)
            .aliases(config.aliases)
            .language(config.language)
            .category(config.category)
            .strip_namespaces(config.strip_namespaces);
        source.display_url = config.display_url;
        source
    }
}

impl EngineConfig {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse configuration")?;
        Ok(config.normalized())
    }

    /// Load from a specific file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load following the documented lookup order.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(Path::new(expand_tilde(path).as_ref()));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_file(Path::new(expand_tilde(&path).as_ref()));
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    fn normalized(mut self) -> Self {
        self.max_results = self.max_results.clamp(1, MAX_RESULTS);
        self.decode_chunk_size = self.decode_chunk_size.max(1);
        self
    }

    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            query_capacity: NonZeroUsize::new(self.scrape_cache_capacity).unwrap_or(NonZeroUsize::MIN),
            query_ttl: self.scrape_cache_ttl_secs.map(Duration::from_secs),
            decode_chunk_size: self.decode_chunk_size,
        }
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Extra sources as descriptors.
    pub fn extra_sources(&self) -> impl Iterator<Item = SourceDescriptor> + '_ {
        self.sources.iter().cloned().map(SourceDescriptor::from)
    }
}

/// `<config dir>/rtfm-mcp/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rtfm-mcp").join("config.toml"))
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
