//! Booking and content backend for The Hideout hostel.
//!
//! Serves the JSON API used by the public site and the admin back-office:
//! rooms, offers, bookings, blog and feature posts, plus the pricing engine
//! that turns a cart of rooms into a discounted, taxed booking summary.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod store;

#[cfg(test)]
mod test_helpers;

use std::sync::Arc;

use cache::AppCache;
use db::PgStore;
use store::{BlogPostStore, BookingStore, FeaturePostStore, OfferStore, RoomStore};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<dyn RoomStore>,
    pub offers: Arc<dyn OfferStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub blog_posts: Arc<dyn BlogPostStore>,
    pub feature_posts: Arc<dyn FeaturePostStore>,
    pub cache: AppCache,
}

impl AppState {
    /// State backed by PostgreSQL for every entity
    pub fn new(store: PgStore, cache: AppCache) -> Self {
        let store = Arc::new(store);
        Self {
            rooms: store.clone(),
            offers: store.clone(),
            bookings: store.clone(),
            blog_posts: store.clone(),
            feature_posts: store,
            cache,
        }
    }
}
