//! Shared fixtures for unit and handler tests

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::models::{
    BlogPost, Booking, BookingStatus, FeaturePost, Offer, OfferType, Room, RoomCategory,
};
use crate::store::{
    MockBlogPostStore, MockBookingStore, MockFeaturePostStore, MockOfferStore, MockRoomStore,
};
use crate::AppState;

/// One mock per store; unset expectations panic when called
#[derive(Default)]
pub(crate) struct TestStores {
    pub rooms: MockRoomStore,
    pub offers: MockOfferStore,
    pub bookings: MockBookingStore,
    pub blog_posts: MockBlogPostStore,
    pub feature_posts: MockFeaturePostStore,
}

impl TestStores {
    pub fn into_state(self) -> AppState {
        AppState {
            rooms: Arc::new(self.rooms),
            offers: Arc::new(self.offers),
            bookings: Arc::new(self.bookings),
            blog_posts: Arc::new(self.blog_posts),
            feature_posts: Arc::new(self.feature_posts),
            cache: AppCache::new(),
        }
    }

    pub fn into_router(self) -> Router {
        crate::routes::api_router().with_state(self.into_state())
    }
}

pub(crate) fn room(name: &str, category: RoomCategory, price: Decimal) -> Room {
    Room {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category,
        capacity: 2,
        price,
        description: String::new(),
        amenities: vec!["WiFi".to_string()],
        available: true,
        created_at: Utc::now(),
    }
}

pub(crate) fn offer(title: &str, offer_type: OfferType, discount: Decimal) -> Offer {
    Offer {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: format!("{} offer", title),
        discount,
        offer_type,
        applicable_rooms: vec![],
        min_days: 0,
        valid_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        valid_to: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        code: title.to_uppercase().replace(' ', ""),
        active: true,
        created_at: Utc::now(),
    }
}

pub(crate) fn booking(room_id: Uuid, status: BookingStatus) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        guest_name: "John Doe".to_string(),
        email: "john@example.com".to_string(),
        phone: "+91-9876543210".to_string(),
        room_ids: vec![room_id],
        check_in: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        check_out: NaiveDate::from_ymd_opt(2026, 5, 3).unwrap(),
        guest_count: 1,
        special_requests: String::new(),
        price: Decimal::from(1000),
        status,
        created_at: Utc::now(),
    }
}

pub(crate) fn blog_post(title: &str, published: bool) -> BlogPost {
    BlogPost {
        id: Uuid::new_v4(),
        title: title.to_string(),
        author: "Admin".to_string(),
        category: "travel".to_string(),
        excerpt: "Short excerpt".to_string(),
        content: "Full content".to_string(),
        date: Utc::now(),
        image: "hiking.jpg".to_string(),
        published,
        created_at: Utc::now(),
    }
}

pub(crate) fn feature_post(active: bool) -> FeaturePost {
    FeaturePost {
        id: Uuid::new_v4(),
        image: "sunset.jpg".to_string(),
        instagram_url: "https://instagram.com/p/hideout".to_string(),
        active,
        created_at: Utc::now(),
    }
}

/// Send one request through `app` and decode the JSON body (Null when empty)
pub(crate) async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
