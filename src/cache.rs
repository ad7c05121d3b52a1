//! In-memory caching using moka
//!
//! Provides application-level caching for the public listings: rooms,
//! offers, blog posts and feature posts. Admin mutations invalidate the
//! whole cache of the entity they touch; bookings are never cached.

use chrono::{NaiveDate, Utc};
use moka::future::Cache;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::models::{BlogPost, FeaturePost, Offer, Room};
use crate::AppState;

/// Listings of one entity, keyed by filter.
///
/// Every invalidation bumps a generation counter. A listing loaded from the
/// store is only cached if no invalidation happened while it was in flight,
/// so a read racing an admin mutation cannot put pre-mutation data back.
#[derive(Clone)]
pub struct ListCache<T> {
    entries: Cache<String, Arc<Vec<T>>>,
    generation: Arc<AtomicU64>,
}

impl<T> ListCache<T>
where
    T: Send + Sync + 'static,
{
    fn new(entries: Cache<String, Arc<Vec<T>>>) -> Self {
        Self {
            entries,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<Vec<T>>> {
        self.entries.get(key).await
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Cache `value` unless the listing was invalidated since `seen` was read.
    ///
    /// Returns whether the value stayed in the cache.
    pub async fn insert_if_current(&self, key: String, value: Arc<Vec<T>>, seen: u64) -> bool {
        if self.generation() != seen {
            return false;
        }

        self.entries.insert(key.clone(), value).await;

        // An invalidation may have landed between the check and the insert
        if self.generation() != seen {
            self.entries.invalidate(&key).await;
            return false;
        }
        true
    }

    /// Cached listing for `key`, loading it from the store on a miss
    pub async fn get_or_try_load<E, F, Fut>(&self, key: String, load: F) -> Result<Arc<Vec<T>>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        if let Some(cached) = self.get(&key).await {
            debug!("Cache HIT for {}", key);
            return Ok(cached);
        }

        debug!("Cache MISS for {}", key);
        let seen = self.generation();
        let value = Arc::new(load().await?);
        if !self.insert_if_current(key.clone(), value.clone(), seen).await {
            debug!("Listing {} changed while loading; not cached", key);
        }

        Ok(value)
    }

    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.entries.invalidate_all();
    }

    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}

/// Application cache holding entity listings, keyed by filter
#[derive(Clone)]
pub struct AppCache {
    /// Room listings ("rooms:all" / "rooms:available")
    pub rooms: ListCache<Room>,
    /// Offer listings ("offers:all" / "active:<date>")
    pub offers: ListCache<Offer>,
    /// Blog listings ("blogs:all" / "blogs:published" / "blogs:draft")
    pub blog_posts: ListCache<BlogPost>,
    /// Feature post listings ("feature:all" / "feature:active" / "feature:inactive")
    pub feature_posts: ListCache<FeaturePost>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Rooms: a couple of listings, 15 min TTL
            rooms: ListCache::new(
                Cache::builder()
                    .max_capacity(10)
                    .time_to_live(Duration::from_secs(15 * 60))
                    .build(),
            ),

            // Offers: one entry per reference date, 15 min TTL, 5 min idle
            offers: ListCache::new(
                Cache::builder()
                    .max_capacity(50)
                    .time_to_live(Duration::from_secs(15 * 60))
                    .time_to_idle(Duration::from_secs(5 * 60))
                    .build(),
            ),

            // Blog posts: 1 hour TTL (rarely changes after publish)
            blog_posts: ListCache::new(
                Cache::builder()
                    .max_capacity(10)
                    .time_to_live(Duration::from_secs(60 * 60))
                    .time_to_idle(Duration::from_secs(30 * 60))
                    .build(),
            ),

            // Feature posts: 30 min TTL
            feature_posts: ListCache::new(
                Cache::builder()
                    .max_capacity(10)
                    .time_to_live(Duration::from_secs(30 * 60))
                    .build(),
            ),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            rooms_size: self.rooms.entry_count(),
            offers_size: self.offers.entry_count(),
            blog_posts_size: self.blog_posts.entry_count(),
            feature_posts_size: self.feature_posts.entry_count(),
        }
    }

    pub fn invalidate_rooms(&self) {
        self.rooms.invalidate();
        info!("Room cache invalidated");
    }

    pub fn invalidate_offers(&self) {
        self.offers.invalidate();
        info!("Offer cache invalidated");
    }

    pub fn invalidate_blog_posts(&self) {
        self.blog_posts.invalidate();
        info!("Blog cache invalidated");
    }

    pub fn invalidate_feature_posts(&self) {
        self.feature_posts.invalidate();
        info!("Feature post cache invalidated");
    }

    /// Generate cache key for a room listing
    pub fn rooms_key(available_only: bool) -> String {
        if available_only {
            "rooms:available".to_string()
        } else {
            "rooms:all".to_string()
        }
    }

    /// Cache key for the full offer listing
    pub fn all_offers_key() -> String {
        "offers:all".to_string()
    }

    /// Generate cache key for offers active on a date
    pub fn active_offers_key(on: NaiveDate) -> String {
        format!("active:{}", on)
    }

    pub fn blog_posts_key(published: Option<bool>) -> String {
        match published {
            Some(true) => "blogs:published".to_string(),
            Some(false) => "blogs:draft".to_string(),
            None => "blogs:all".to_string(),
        }
    }

    pub fn feature_posts_key(active: Option<bool>) -> String {
        match active {
            Some(true) => "feature:active".to_string(),
            Some(false) => "feature:inactive".to_string(),
            None => "feature:all".to_string(),
        }
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub rooms_size: u64,
    pub offers_size: u64,
    pub blog_posts_size: u64,
    pub feature_posts_size: u64,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every `period`.
pub async fn start_cache_warmer(state: AppState, period: Duration) {
    let mut interval = interval(period);
    loop {
        // First tick completes immediately, giving the initial warm-up
        interval.tick().await;
        warm_cache(&state).await;
    }
}

/// Warm the cache with the listings the public site asks for
async fn warm_cache(state: &AppState) {
    info!("Starting cache warm-up...");
    let cache = &state.cache;

    let seen = cache.rooms.generation();
    match state.rooms.list_rooms().await {
        Ok(rooms) => {
            cache
                .rooms
                .insert_if_current(AppCache::rooms_key(false), Arc::new(rooms), seen)
                .await;
        }
        Err(e) => warn!("Failed to warm room cache: {}", e),
    }

    let today = Utc::now().date_naive();
    let seen = cache.offers.generation();
    match state.offers.list_active_offers(today).await {
        Ok(offers) => {
            cache
                .offers
                .insert_if_current(AppCache::active_offers_key(today), Arc::new(offers), seen)
                .await;
        }
        Err(e) => warn!("Failed to warm offer cache: {}", e),
    }

    let seen = cache.blog_posts.generation();
    match state.blog_posts.list_blog_posts(Some(true)).await {
        Ok(posts) => {
            cache
                .blog_posts
                .insert_if_current(AppCache::blog_posts_key(Some(true)), Arc::new(posts), seen)
                .await;
        }
        Err(e) => warn!("Failed to warm blog cache: {}", e),
    }

    let seen = cache.feature_posts.generation();
    match state.feature_posts.list_feature_posts(Some(true)).await {
        Ok(posts) => {
            cache
                .feature_posts
                .insert_if_current(AppCache::feature_posts_key(Some(true)), Arc::new(posts), seen)
                .await;
        }
        Err(e) => warn!("Failed to warm feature post cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoomCategory;
    use crate::store::StoreError;
    use crate::test_helpers::{room, TestStores};
    use rust_decimal_macros::dec;

    #[test]
    fn test_listing_keys_differ_by_filter() {
        assert_ne!(AppCache::rooms_key(true), AppCache::rooms_key(false));
        assert_ne!(
            AppCache::blog_posts_key(Some(true)),
            AppCache::blog_posts_key(None)
        );
        assert_eq!(
            AppCache::active_offers_key(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()),
            "active:2026-03-09"
        );
    }

    #[tokio::test]
    async fn test_invalidate_only_touches_one_entity() {
        let cache = AppCache::new();
        let rooms_seen = cache.rooms.generation();
        let offers_seen = cache.offers.generation();
        cache
            .rooms
            .insert_if_current(AppCache::rooms_key(false), Arc::new(vec![]), rooms_seen)
            .await;
        cache
            .offers
            .insert_if_current(AppCache::all_offers_key(), Arc::new(vec![]), offers_seen)
            .await;

        cache.invalidate_rooms();

        assert!(cache.rooms.get(&AppCache::rooms_key(false)).await.is_none());
        assert!(cache.offers.get(&AppCache::all_offers_key()).await.is_some());
    }

    #[tokio::test]
    async fn test_listing_loaded_before_invalidation_is_not_cached() {
        let cache = AppCache::new();
        let key = AppCache::all_offers_key();

        let seen = cache.offers.generation();
        cache.invalidate_offers();

        let kept = cache
            .offers
            .insert_if_current(key.clone(), Arc::new(vec![]), seen)
            .await;

        assert!(!kept);
        assert!(cache.offers.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_get_or_try_load_caches_on_miss() {
        let cache = AppCache::new();
        let key = AppCache::rooms_key(false);

        let loaded = cache
            .rooms
            .get_or_try_load(key.clone(), || async {
                Ok::<_, StoreError>(vec![room("Mountain View Dorm", RoomCategory::Dorm, dec!(500))])
            })
            .await
            .unwrap();
        assert_eq!(loaded.len(), 1);

        let cached = cache
            .rooms
            .get_or_try_load(key, || async { Err(StoreError::NotFound) })
            .await
            .unwrap();
        assert_eq!(cached.len(), 1);
    }

    #[tokio::test]
    async fn test_warm_cache_skips_failed_listings() {
        let mut stores = TestStores::default();
        stores.rooms.expect_list_rooms().returning(|| {
            Ok(vec![room("Mountain View Dorm", RoomCategory::Dorm, dec!(500))])
        });
        stores
            .offers
            .expect_list_active_offers()
            .returning(|_| Err(StoreError::InvalidData));
        stores
            .blog_posts
            .expect_list_blog_posts()
            .returning(|_| Ok(vec![]));
        stores
            .feature_posts
            .expect_list_feature_posts()
            .returning(|_| Ok(vec![]));
        let state = stores.into_state();

        warm_cache(&state).await;

        let rooms = state.cache.rooms.get(&AppCache::rooms_key(false)).await;
        assert_eq!(rooms.map(|r| r.len()), Some(1));
        let today = AppCache::active_offers_key(Utc::now().date_naive());
        assert!(state.cache.offers.get(&today).await.is_none());
        assert!(state
            .cache
            .blog_posts
            .get(&AppCache::blog_posts_key(Some(true)))
            .await
            .is_some());
    }
}
