//! TTL-bounded response cache sitting in front of upstream order lookups.
//!
//! The cache is the only shared mutable state in the bot. It supports
//! concurrent readers and writers (`tokio::sync::RwLock`, atomic entry
//! replacement) and enforces at-most-one-fresh-lookup-per-key through
//! [`LookupCache::get_or_fetch`]: concurrent misses for the same key
//! serialize on a per-key gate, the winner performs the single upstream
//! fetch and populates the entry, and waiters re-check and hit.
//!
//! A zero TTL disables caching outright: every `get` is a forced miss and
//! `put` is a no-op.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, trace};

use order_core::{LookupError, OrderStatusResult};

/// A cached value and its insertion time.
///
/// An entry is valid iff `now < inserted_at + ttl`; at or after that
/// instant it is treated as absent.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: OrderStatusResult,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        now.duration_since(self.inserted_at) < ttl
    }
}

/// Concurrency-safe TTL cache keyed by the canonical lookup key.
pub struct LookupCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
    gates: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl LookupCache {
    /// Create a cache with the given TTL. `Duration::ZERO` disables caching.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
        }
    }

    /// Whether caching is enabled.
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// The configured TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the entry for `key` if present and unexpired.
    ///
    /// Expired entries are treated as absent and evicted opportunistically.
    pub async fn get(&self, key: &str) -> Option<OrderStatusResult> {
        if !self.is_enabled() {
            return None;
        }

        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_fresh(self.ttl, now) => {
                    trace!(key, "cache hit");
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // The entry exists but is stale; evict it unless a fresh one
        // replaced it between the locks.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.is_fresh(self.ttl, now) {
                return Some(entry.value.clone());
            }
            entries.remove(key);
            trace!(key, "evicted expired entry");
        }
        None
    }

    /// Insert or overwrite `key`, resetting its expiry from now.
    pub async fn put(&self, key: &str, value: OrderStatusResult) {
        if !self.is_enabled() {
            return;
        }
        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
        };
        self.entries.write().await.insert(key.to_string(), entry);
    }

    /// Clear all entries.
    ///
    /// Authorization is the transport layer's concern; the cache itself
    /// performs no credential checks.
    pub async fn invalidate_all(&self) {
        let mut entries = self.entries.write().await;
        let dropped = entries.len();
        entries.clear();
        debug!(dropped, "cache invalidated");
    }

    /// Number of stored entries, including ones awaiting lazy expiry.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Proactively drop all expired entries.
    pub async fn sweep_expired(&self) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(self.ttl, now));
        let swept = before - entries.len();
        if swept > 0 {
            debug!(swept, "swept expired entries");
        }
    }

    /// Return the cached value for `key`, or run `fetch` to produce it.
    ///
    /// Concurrent callers that miss on the same key serialize on a per-key
    /// gate: exactly one runs `fetch`, the rest wait and then hit the entry
    /// it stored. Failed fetches are never cached; the next holder of the
    /// gate performs its own fetch. With caching disabled this degrades to
    /// a direct, uncoalesced fetch (there is no entry to coalesce onto).
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: &str,
        fetch: F,
    ) -> Result<OrderStatusResult, LookupError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<OrderStatusResult, LookupError>>,
    {
        if !self.is_enabled() {
            return fetch().await;
        }

        if let Some(hit) = self.get(key).await {
            return Ok(hit);
        }

        let gate = {
            let mut gates = self.gates.lock().await;
            gates
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        let result = {
            let _held = gate.lock().await;
            match self.get(key).await {
                Some(hit) => {
                    trace!(key, "coalesced into fresh entry");
                    Ok(hit)
                }
                None => {
                    let result = fetch().await;
                    if let Ok(value) = &result {
                        self.put(key, value.clone()).await;
                    }
                    result
                }
            }
        };

        // Drop the gate registration; waiters still hold their clones, and
        // late arrivals re-check the cache before fetching.
        self.gates.lock().await.remove(key);

        result
    }
}
