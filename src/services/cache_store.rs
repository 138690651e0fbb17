use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::FeedDocument;
use crate::errors::CircliteResult;
use crate::storage::traits::KvStore;

/// Payload key; the serialized feed document.
pub const CACHE_KEY: &str = "fcl_cache";
/// Timestamp key; epoch millis of the last write, as an integer string.
pub const CACHE_TIME_KEY: &str = "fcl_time";

/// TTL-gated feed cache over a key/value store. Caching is an optimization:
/// reads degrade to absent and writes are best-effort, so no method here
/// surfaces storage errors to the caller.
pub struct CacheStore<K: KvStore> {
    kv: K,
}

impl<K: KvStore> CacheStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// The cached document, or `None` when the entry is missing, older than
    /// `ttl_ms`, or unparsable.
    pub fn get(&self, ttl_ms: i64) -> Option<FeedDocument> {
        self.get_at(ttl_ms, Utc::now().timestamp_millis())
    }

    fn get_at(&self, ttl_ms: i64, now_ms: i64) -> Option<FeedDocument> {
        let stored_at = self
            .kv
            .get(CACHE_TIME_KEY)
            .ok()
            .flatten()?
            .parse::<i64>()
            .ok()?;

        if now_ms - stored_at >= ttl_ms {
            debug!(stored_at, "cached feed expired");
            return None;
        }

        let raw = self.kv.get(CACHE_KEY).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(document) => Some(document),
            Err(e) => {
                debug!(error = %e, "cached feed unparsable, treating as absent");
                None
            }
        }
    }

    /// Write-through; failures are logged and swallowed.
    pub fn set(&self, document: &FeedDocument) {
        self.set_at(document, Utc::now().timestamp_millis());
    }

    fn set_at(&self, document: &FeedDocument, now_ms: i64) {
        let payload = match serde_json::to_string(document) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "failed to serialize feed for caching");
                return;
            }
        };

        // Payload first, then timestamp: a torn write leaves a stale
        // timestamp pointing at the previous (still parsable) payload.
        if let Err(e) = self.kv.set(CACHE_KEY, &payload) {
            warn!(error = %e, "cache write failed");
            return;
        }
        if let Err(e) = self.kv.set(CACHE_TIME_KEY, &now_ms.to_string()) {
            warn!(error = %e, "cache timestamp write failed");
        }
    }

    /// Epoch millis of the last successful write, if any.
    pub fn stored_at(&self) -> Option<i64> {
        self.kv
            .get(CACHE_TIME_KEY)
            .ok()
            .flatten()?
            .parse::<i64>()
            .ok()
    }

    pub fn clear(&self) -> CircliteResult<()> {
        self.kv.remove(CACHE_KEY)?;
        self.kv.remove(CACHE_TIME_KEY)?;
        Ok(())
    }
}
