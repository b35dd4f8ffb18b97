//! Injected cache for short-lived tokens, backed by Moka.
//!
//! Each entry is a `(value, expires_at)` pair and expires on its own
//! deadline, less a configurable skew. Refresh is lazy: the first read of a
//! missing or expired key runs the fetch, and concurrent readers of the same
//! key wait for that one fetch instead of issuing their own.

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Duration, Utc};
use moka::Expiry;
use moka::future::Cache;

/// Default maximum number of cached tokens.
const DEFAULT_CAPACITY: u64 = 10_000;

/// Default skew subtracted from every expiry (30 seconds).
const DEFAULT_SKEW_SECS: i64 = 30;

/// A token value together with its expiry instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken<T> {
    /// The cached value.
    pub value: T,
    /// Instant after which the value must not be used.
    pub expires_at: DateTime<Utc>,
}

impl<T> CachedToken<T> {
    /// Creates a cached token that expires `ttl` from now.
    #[must_use]
    pub fn expiring_in(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Utc::now() + ttl,
        }
    }
}

struct SkewedExpiry {
    skew: Duration,
}

impl<K, T> Expiry<K, CachedToken<T>> for SkewedExpiry {
    fn expire_after_create(
        &self,
        _key: &K,
        value: &CachedToken<T>,
        _created_at: Instant,
    ) -> Option<std::time::Duration> {
        let remaining = value.expires_at - self.skew - Utc::now();
        Some(remaining.to_std().unwrap_or_default())
    }
}

/// Keyed token cache with per-entry expiry and single-flight refresh.
#[derive(Clone)]
pub struct TokenCache<K, T> {
    cache: Cache<K, CachedToken<T>>,
}

impl<K, T> Default for TokenCache<K, T>
where
    K: Hash + Eq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, Duration::seconds(DEFAULT_SKEW_SECS))
    }
}

impl<K, T> TokenCache<K, T>
where
    K: Hash + Eq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Creates an empty cache. Entries are treated as expired `skew` early.
    #[must_use]
    pub fn new(max_capacity: u64, skew: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(SkewedExpiry { skew })
            .build();

        Self { cache }
    }

    /// Returns the cached value for `key`, fetching a fresh one if missing or
    /// expired.
    ///
    /// A failed fetch caches nothing and is returned to every waiting caller.
    pub async fn get_or_refresh<F, Fut, E>(&self, key: K, fetch: F) -> Result<T, Arc<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachedToken<T>, E>>,
        E: Send + Sync + 'static,
    {
        self.cache
            .try_get_with(key, fetch())
            .await
            .map(|cached| cached.value)
    }

    /// Drops the entry for `key` so the next read refreshes.
    pub async fn invalidate(&self, key: &K) {
        self.cache.invalidate(key).await;
    }

    /// Returns the current entry for `key` without refreshing.
    pub async fn peek(&self, key: &K) -> Option<CachedToken<T>> {
        self.cache.get(key).await
    }
}
