use tracing::{debug, warn};

use crate::api::FeedApi;
use crate::domain::{ArticleRecord, FeedDocument, StatisticalSummary};
use crate::errors::{CircliteError, CircliteResult};
use crate::services::cache_store::CacheStore;
use crate::storage::traits::KvStore;

/// Result of a feed load; the article set is replaced wholesale each time.
#[derive(Debug, Clone)]
pub struct LoadedFeed {
    pub articles: Vec<ArticleRecord>,
    pub stats: Option<StatisticalSummary>,
    pub from_cache: bool,
}

impl LoadedFeed {
    fn from_document(document: FeedDocument, from_cache: bool) -> Self {
        Self {
            articles: document.article_data,
            stats: document.statistical_data,
            from_cache,
        }
    }
}

/// The article repository: cache-first load with a single network attempt
/// and best-effort write-through. No retry loop.
pub struct ArticleService<A: FeedApi, K: KvStore> {
    api: A,
    cache: CacheStore<K>,
    ttl_ms: i64,
}

impl<A: FeedApi, K: KvStore> ArticleService<A, K> {
    pub fn new(api: A, cache: CacheStore<K>, ttl_ms: i64) -> Self {
        Self { api, cache, ttl_ms }
    }

    /// Serve from cache when a fresh entry exists, otherwise hit the network.
    pub fn load(&self) -> CircliteResult<LoadedFeed> {
        if let Some(document) = self.cache.get(self.ttl_ms) {
            debug!("feed served from cache");
            return Ok(LoadedFeed::from_document(document, true));
        }

        self.refresh()
    }

    /// Bypass the cache: one fetch, write-through on success.
    pub fn refresh(&self) -> CircliteResult<LoadedFeed> {
        let document = self.api.fetch_all().map_err(|e| {
            warn!(error = %e, "feed fetch failed");
            CircliteError::FetchFailed
        })?;

        self.cache.set(&document);
        Ok(LoadedFeed::from_document(document, false))
    }

    pub fn cache(&self) -> &CacheStore<K> {
        &self.cache
    }
}
