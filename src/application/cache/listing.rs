//! Time-bounded listing snapshots per (platform, category).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::Deserialize;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::domain::{Category, Listing, Platform};
use crate::error::Error;
use crate::port::outbound::source::{source_label, ListingSource};

/// Listing cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Seconds a snapshot stays fresh.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

const fn default_ttl_secs() -> u64 {
    10
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

type CacheKey = (Platform, Option<Category>);

/// A stored snapshot, shared cheaply between the cache and the cycle.
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    pub listings: Arc<[Listing]>,
    pub fetched_at: Instant,
    /// True when this call went to the network.
    pub refreshed: bool,
}

impl CachedSnapshot {
    #[must_use]
    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }
}

/// Errors returned by [`ListingCache::get`].
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("no listing source registered for {platform}")]
    NoSource { platform: Platform },

    /// The fetch failed. The previous entry, if any, is left untouched and
    /// handed back as `stale`.
    #[error("failed to fetch {platform}/{}: {source}", category_name(.category))]
    Fetch {
        platform: Platform,
        category: Option<Category>,
        stale: Option<CachedSnapshot>,
        #[source]
        source: Error,
    },
}

fn category_name(category: &Option<Category>) -> &str {
    category.as_ref().map_or("*", Category::as_str)
}

struct CacheEntry {
    listings: Arc<[Listing]>,
    fetched_at: Instant,
}

/// Keyed listing store with a fixed time-to-live.
///
/// Owned by one component and handed to the detection cycle by `Arc`. Entries
/// are replaced wholesale on refresh. The lock is never held across a fetch.
pub struct ListingCache {
    sources: HashMap<Platform, Arc<dyn ListingSource>>,
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl ListingCache {
    /// Create a cache over the given sources, one per platform.
    ///
    /// A later source for the same platform replaces an earlier one.
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn ListingSource>>, ttl: Duration) -> Self {
        let sources = sources
            .into_iter()
            .map(|source| (source.platform(), source))
            .collect();
        Self {
            sources,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the snapshot for `(platform, category)`, fetching on miss or expiry.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Fetch`] when a needed fetch fails, carrying the
    /// expired snapshot if one exists, and [`CacheError::NoSource`] when no
    /// source serves `platform`.
    pub async fn get(
        &self,
        platform: Platform,
        category: Option<&Category>,
    ) -> Result<CachedSnapshot, CacheError> {
        let key = (platform, category.cloned());
        let stale = {
            let entries = self.entries.read();
            match entries.get(&key) {
                Some(entry) if entry.fetched_at.elapsed() < self.ttl => {
                    debug!(source = %source_label(platform, category), "Listing cache hit");
                    return Ok(CachedSnapshot {
                        listings: Arc::clone(&entry.listings),
                        fetched_at: entry.fetched_at,
                        refreshed: false,
                    });
                }
                Some(entry) => Some(CachedSnapshot {
                    listings: Arc::clone(&entry.listings),
                    fetched_at: entry.fetched_at,
                    refreshed: false,
                }),
                None => None,
            }
        };

        let source = self
            .sources
            .get(&platform)
            .ok_or(CacheError::NoSource { platform })?;

        match source.fetch(category).await {
            Ok(listings) => {
                let listings: Arc<[Listing]> = listings.into();
                let fetched_at = Instant::now();
                debug!(
                    source = %source_label(platform, category),
                    listings = listings.len(),
                    "Listing cache refreshed"
                );
                self.entries.write().insert(
                    key,
                    CacheEntry {
                        listings: Arc::clone(&listings),
                        fetched_at,
                    },
                );
                Ok(CachedSnapshot {
                    listings,
                    fetched_at,
                    refreshed: true,
                })
            }
            Err(error) => {
                warn!(
                    source = %source_label(platform, category),
                    error = %error,
                    has_stale = stale.is_some(),
                    "Listing fetch failed"
                );
                Err(CacheError::Fetch {
                    platform,
                    category: key.1,
                    stale,
                    source: error,
                })
            }
        }
    }

    /// Drop the entry for `(platform, category)` so the next `get` refetches.
    pub fn invalidate(&self, platform: Platform, category: Option<&Category>) {
        self.entries.write().remove(&(platform, category.cloned()));
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of stored entries, fresh or expired.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ListingId;
    use crate::error::Result;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct Counting {
        fetches: AtomicUsize,
        fail: AtomicBool,
    }

    #[async_trait]
    impl ListingSource for Counting {
        fn platform(&self) -> Platform {
            Platform::A
        }

        async fn fetch(&self, _category: Option<&Category>) -> Result<Vec<Listing>> {
            let n = self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(Error::Connection("refused".into()));
            }
            let listing = Listing::builder(Platform::A, ListingId::new(format!("m-{n}")))
                .question("Will it rain?")
                .prices(dec!(0.5), dec!(0.5))
                .liquidity(dec!(100))
                .build()?;
            Ok(vec![listing])
        }
    }

    fn setup() -> (Arc<Counting>, ListingCache) {
        let source = Arc::new(Counting {
            fetches: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        });
        let cache = ListingCache::new(vec![source.clone()], Duration::from_secs(10));
        (source, cache)
    }

    #[tokio::test(start_paused = true)]
    async fn hit_within_ttl_does_not_fetch() {
        let (source, cache) = setup();

        let first = cache.get(Platform::A, None).await.unwrap();
        tokio::time::advance(Duration::from_secs(9)).await;
        let second = cache.get(Platform::A, None).await.unwrap();

        assert!(first.refreshed);
        assert!(!second.refreshed);
        assert!(Arc::ptr_eq(&first.listings, &second.listings));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_triggers_exactly_one_fetch() {
        let (source, cache) = setup();

        cache.get(Platform::A, None).await.unwrap();
        tokio::time::advance(Duration::from_secs(10)).await;
        let refreshed = cache.get(Platform::A, None).await.unwrap();
        let again = cache.get(Platform::A, None).await.unwrap();

        assert!(refreshed.refreshed);
        assert!(!again.refreshed);
        assert_eq!(refreshed.listings[0].id().as_str(), "m-1");
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_keeps_previous_entry() {
        let (source, cache) = setup();

        cache.get(Platform::A, None).await.unwrap();
        tokio::time::advance(Duration::from_secs(11)).await;
        source.fail.store(true, Ordering::SeqCst);

        let err = cache.get(Platform::A, None).await.unwrap_err();
        let CacheError::Fetch { stale, source: cause, .. } = err else {
            panic!("expected fetch error");
        };
        assert!(cause.is_retryable());
        assert_eq!(stale.unwrap().listings[0].id().as_str(), "m-0");

        source.fail.store(false, Ordering::SeqCst);
        let recovered = cache.get(Platform::A, None).await.unwrap();
        assert!(recovered.refreshed);
    }

    #[tokio::test]
    async fn failure_without_entry_has_no_stale_snapshot() {
        let (source, cache) = setup();
        source.fail.store(true, Ordering::SeqCst);

        let err = cache.get(Platform::A, None).await.unwrap_err();

        assert!(matches!(err, CacheError::Fetch { stale: None, .. }));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn categories_are_cached_separately() {
        let (source, cache) = setup();
        let politics = Category::from("politics");

        cache.get(Platform::A, None).await.unwrap();
        cache.get(Platform::A, Some(&politics)).await.unwrap();
        cache.get(Platform::A, Some(&politics)).await.unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_and_clear_force_refetch() {
        let (source, cache) = setup();

        cache.get(Platform::A, None).await.unwrap();
        cache.invalidate(Platform::A, None);
        cache.get(Platform::A, None).await.unwrap();
        cache.clear();
        assert!(cache.is_empty());
        cache.get(Platform::A, None).await.unwrap();

        assert_eq!(source.fetches.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn unknown_platform_is_an_error() {
        let (_, cache) = setup();
        let err = cache.get(Platform::B, None).await.unwrap_err();
        assert!(matches!(err, CacheError::NoSource { platform: Platform::B }));
    }
}
