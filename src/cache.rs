//! Read-through result cache.
//!
//! Two tiers, both keyed by canonical source name:
//! - symbol indices built from inventories, one per source
//! - scrape results, one per (source, query text), LRU-bounded with an optional TTL
//!
//! Misses are filled through [`InFlight`] so that concurrent requests for the
//! same key trigger exactly one fetch. Values are published with a single
//! insert; readers see either nothing or the complete value.

use crate::error::{LookupError, Result};
use crate::fetch::Fetcher;
use crate::flight::InFlight;
use crate::inventory;
use crate::registry::{AdapterKind, SourceDescriptor};
use crate::search::SymbolIndex;
use crate::types::QueryResult;
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

/// Default number of scrape results kept in memory.
const DEFAULT_QUERY_CAPACITY: usize = 512;

/// Key of the scrape tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub source: String,
    pub query: String,
}

impl QueryKey {
    pub fn new(source: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            query: query.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedQuery {
    result: QueryResult,
    stored_at: Instant,
}

/// Cache sizing and decoding knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    pub query_capacity: NonZeroUsize,
    pub query_ttl: Option<Duration>,
    pub decode_chunk_size: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            query_capacity: NonZeroUsize::new(DEFAULT_QUERY_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            query_ttl: None,
            decode_chunk_size: inventory::DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Snapshot of cache occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub indices: usize,
    pub queries: usize,
    pub building: usize,
    pub querying: usize,
}

struct CacheState {
    indices: RwLock<HashMap<String, Arc<SymbolIndex>>>,
    queries: Mutex<LruCache<QueryKey, CachedQuery>>,
    index_flights: Arc<InFlight<String, Arc<SymbolIndex>>>,
    query_flights: Arc<InFlight<QueryKey, QueryResult>>,
    settings: CacheSettings,
}

impl CacheState {
    async fn index(&self, source: &str) -> Option<Arc<SymbolIndex>> {
        self.indices
            .read()
            .await
            .get(source)
            .filter(|index| !index.is_empty())
            .cloned()
    }

    async fn query(&self, key: &QueryKey) -> Option<QueryResult> {
        let mut queries = self.queries.lock().await;
        let entry = queries.get(key)?;

        if let Some(ttl) = self.settings.query_ttl
            && entry.stored_at.elapsed() > ttl
        {
            tracing::debug!("Cached result for {:?} expired", key);
            queries.pop(key);
            return None;
        }

        Some(entry.result.clone())
    }
}

/// Cache of symbol indices and scrape results, filled through a [`Fetcher`].
///
/// Cheap to clone; clones share the same storage.
#[derive(Clone)]
pub struct ResultCache {
    state: Arc<CacheState>,
    fetcher: Arc<dyn Fetcher>,
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("settings", &self.state.settings)
            .finish_non_exhaustive()
    }
}

impl ResultCache {
    pub fn new(fetcher: Arc<dyn Fetcher>, settings: CacheSettings) -> Self {
        Self {
            state: Arc::new(CacheState {
                indices: RwLock::new(HashMap::new()),
                queries: Mutex::new(LruCache::new(settings.query_capacity)),
                index_flights: Arc::new(InFlight::new()),
                query_flights: Arc::new(InFlight::new()),
                settings,
            }),
            fetcher,
        }
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.state.settings
    }

    /// Get the symbol index for `source`, building it on a miss.
    ///
    /// A failed build publishes nothing, so the next call retries. An empty
    /// index is returned but not kept.
    pub async fn get_or_build_index(&self, source: &Arc<SourceDescriptor>) -> Result<Arc<SymbolIndex>> {
        let key = source.name.clone();

        if let Some(index) = self.state.index(&key).await {
            tracing::debug!("Index cache hit for {}", key);
            return Ok(index);
        }

        let state = Arc::clone(&self.state);
        let fetcher = Arc::clone(&self.fetcher);
        let owned_source = Arc::clone(source);
        let publish_key = key.clone();

        let build = async move {
            let index = inventory::fetch_index(
                fetcher.as_ref(),
                &owned_source,
                state.settings.decode_chunk_size,
            )
            .await
            .inspect_err(|e| tracing::warn!("Index build for {} failed: {}", owned_source.name, e))?;

            let index = Arc::new(index);
            if index.is_empty() {
                tracing::warn!("Inventory for {} produced no entries; not caching", owned_source.name);
            } else {
                state.indices.write().await.insert(publish_key, Arc::clone(&index));
                tracing::info!("Cached symbol index for {} ({} entries)", owned_source.name, index.len());
            }
            Ok::<_, LookupError>(index)
        };

        self.state
            .index_flights
            .join_or_spawn(key.clone(), self.state.index(&key), build)
            .await
    }

    /// Get the scrape result for `text` on `source`, querying `adapter` on a miss.
    ///
    /// Empty results are cached too; errors are not.
    pub async fn get_or_query(
        &self,
        source: &Arc<SourceDescriptor>,
        adapter: &AdapterKind,
        text: &str,
    ) -> Result<QueryResult> {
        let key = QueryKey::new(source.name.clone(), text);

        if let Some(result) = self.state.query(&key).await {
            tracing::debug!("Query cache hit for {:?}", key);
            return Ok(result);
        }

        let state = Arc::clone(&self.state);
        let fetcher = Arc::clone(&self.fetcher);
        let owned_source = Arc::clone(source);
        let adapter = adapter.clone();
        let publish_key = key.clone();

        let run = async move {
            let result = adapter
                .query(fetcher.as_ref(), &owned_source, &publish_key.query)
                .await?;

            state.queries.lock().await.put(
                publish_key,
                CachedQuery {
                    result: result.clone(),
                    stored_at: Instant::now(),
                },
            );
            Ok::<_, LookupError>(result)
        };

        self.state
            .query_flights
            .join_or_spawn(key.clone(), self.state.query(&key), run)
            .await
    }

    /// Cached index for `source`, without building.
    pub async fn cached_index(&self, source: &str) -> Option<Arc<SymbolIndex>> {
        self.state.index(source).await
    }

    /// Cached scrape result, without querying.
    pub async fn cached_query(&self, source: &str, text: &str) -> Option<QueryResult> {
        self.state.query(&QueryKey::new(source, text)).await
    }

    /// Drop the index for `source`. Returns whether one was cached.
    pub async fn invalidate_index(&self, source: &str) -> bool {
        self.state.indices.write().await.remove(source).is_some()
    }

    /// Drop every scrape result for `source`. Returns how many were dropped.
    pub async fn invalidate_queries(&self, source: &str) -> usize {
        let mut queries = self.state.queries.lock().await;
        let stale: Vec<QueryKey> = queries
            .iter()
            .filter(|(key, _)| key.source == source)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            queries.pop(key);
        }
        stale.len()
    }

    /// Drop everything.
    ///
    /// Work already in flight still publishes its result when it finishes.
    pub async fn clear(&self) {
        self.state.indices.write().await.clear();
        self.state.queries.lock().await.clear();
    }

    /// Check if an index build for `source` is in progress.
    pub async fn is_building(&self, source: &str) -> bool {
        self.state.index_flights.contains(&source.to_string()).await
    }

    /// Snapshot of cache occupancy.
    ///
    /// Each lock is released before the next is taken: flight registries hold
    /// their lock while re-checking the cache tiers.
    pub async fn stats(&self) -> CacheStats {
        let indices = self.state.indices.read().await.len();
        let queries = self.state.queries.lock().await.len();
        let building = self.state.index_flights.len().await;
        let querying = self.state.query_flights.len().await;

        CacheStats {
            indices,
            queries,
            building,
            querying,
        }
    }
}
