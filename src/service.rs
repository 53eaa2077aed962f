//! Lookup orchestration: resolve a source, pick its strategy, answer the query.

use crate::cache::{CacheSettings, CacheStats, ResultCache};
use crate::error::{LookupError, Result};
use crate::fetch::Fetcher;
use crate::registry::{Category, SourceDescriptor, SourceRegistry, Strategy};
use crate::search::suggest_sources;
use crate::types::{LookupOutcome, MAX_RESULTS, QueryResult};
use std::sync::Arc;

/// Descriptive summary of one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    pub name: String,
    pub language: String,
    pub category: Category,
    pub url: String,
    pub aliases: Vec<String>,
    /// `"inventory"` or the scrape adapter name.
    pub strategy: &'static str,
}

impl From<&SourceDescriptor> for SourceInfo {
    fn from(source: &SourceDescriptor) -> Self {
        Self {
            name: source.name.clone(),
            language: source.language.clone(),
            category: source.category,
            url: source.info_url().to_string(),
            aliases: source.aliases.clone(),
            strategy: match &source.strategy {
                Strategy::Inventory => "inventory",
                Strategy::Scrape(kind) => kind.name(),
            },
        }
    }
}

/// What a refresh dropped from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Invalidation {
    pub index: bool,
    pub queries: usize,
}

/// Entry point for documentation lookups.
///
/// Owns the registry and the cache; clones share both.
#[derive(Debug, Clone)]
pub struct LookupService {
    registry: Arc<SourceRegistry>,
    cache: ResultCache,
    max_results: usize,
}

impl LookupService {
    pub fn new(registry: SourceRegistry, fetcher: Arc<dyn Fetcher>, settings: CacheSettings) -> Self {
        Self {
            registry: Arc::new(registry),
            cache: ResultCache::new(fetcher, settings),
            max_results: MAX_RESULTS,
        }
    }

    /// Limit the number of links per answer (clamped to 1..=8).
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.clamp(1, MAX_RESULTS);
        self
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Resolve a name or alias, with suggestions on failure.
    pub fn resolve(&self, name_or_alias: &str) -> Result<&Arc<SourceDescriptor>> {
        self.registry
            .resolve(name_or_alias)
            .ok_or_else(|| LookupError::NotFound {
                name: name_or_alias.trim().to_string(),
                suggestions: suggest_sources(&self.registry, name_or_alias),
            })
    }

    /// Answer `query` against the source named `doc`.
    ///
    /// Without query text (absent or blank) the answer is the source's
    /// informational URL. An empty match list is a successful outcome.
    pub async fn lookup(&self, doc: &str, query: Option<&str>) -> Result<LookupOutcome> {
        let source = self.resolve(doc)?;

        let Some(text) = query.map(str::trim).filter(|text| !text.is_empty()) else {
            return Ok(LookupOutcome::Info {
                source: source.name.clone(),
                url: source.info_url().to_string(),
            });
        };

        tracing::debug!("Looking up '{}' in {}", text, source.name);

        let result = match &source.strategy {
            Strategy::Inventory => {
                let index = self.cache.get_or_build_index(source).await?;
                index.search(text, self.max_results)
            }
            Strategy::Scrape(kind) => self
                .cache
                .get_or_query(source, kind, text)
                .await?
                .truncated(self.max_results),
        };

        Ok(LookupOutcome::Matches {
            source: source.name.clone(),
            result,
        })
    }

    /// Ranked matches for `query` on `doc`.
    ///
    /// A blank `query` is not searched: the source is still resolved (so an
    /// unknown name is an error) but the result is empty and nothing is
    /// fetched. Use [`lookup`](Self::lookup) to get the informational URL for
    /// a blank query instead.
    pub async fn search(&self, doc: &str, query: &str) -> Result<QueryResult> {
        match self.lookup(doc, Some(query)).await? {
            LookupOutcome::Matches { result, .. } => Ok(result),
            LookupOutcome::Info { .. } => Ok(QueryResult::empty()),
        }
    }

    /// Source names, sorted.
    pub fn list_sources(&self) -> Vec<&str> {
        self.registry.names()
    }

    pub fn source_info(&self, doc: &str) -> Result<SourceInfo> {
        self.resolve(doc).map(|source| SourceInfo::from(source.as_ref()))
    }

    /// Drop everything cached for `doc` so the next lookup fetches afresh.
    pub async fn refresh(&self, doc: &str) -> Result<Invalidation> {
        let name = self.resolve(doc)?.name.clone();

        let invalidation = Invalidation {
            index: self.cache.invalidate_index(&name).await,
            queries: self.cache.invalidate_queries(&name).await,
        };
        tracing::info!(
            "Refreshed {} (index dropped: {}, queries dropped: {})",
            name,
            invalidation.index,
            invalidation.queries
        );
        Ok(invalidation)
    }

    /// Drop every cached index and scrape result.
    pub async fn refresh_all(&self) {
        self.cache.clear().await;
        tracing::info!("Cleared all cached documentation");
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
