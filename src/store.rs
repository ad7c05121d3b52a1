//! Entity store contracts.
//!
//! One trait per collection so handlers can be exercised against mocks. The
//! PostgreSQL implementation lives in [`crate::db::PgStore`].

use async_trait::async_trait;
use chrono::NaiveDate;
#[cfg(test)]
use mockall::automock;
use sqlx::error::{DatabaseError, ErrorKind};
use uuid::Uuid;

use crate::models::{
    BlogPost, Booking, BookingStatus, FeaturePost, NewBlogPost, NewBooking, NewFeaturePost,
    NewOffer, NewRoom, Offer, Room,
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("record already exists")]
    AlreadyExists,

    #[error("record violates a constraint")]
    InvalidData,

    #[error("record was modified concurrently")]
    Stale,

    #[error("storage error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            _ => Self::Database(error),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn list_rooms(&self) -> StoreResult<Vec<Room>>;

    async fn get_room(&self, id: Uuid) -> StoreResult<Room>;

    async fn create_room(&self, room: NewRoom) -> StoreResult<Room>;

    /// Persist every field of `room`, keyed by its id
    async fn update_room(&self, room: Room) -> StoreResult<Room>;

    async fn delete_room(&self, id: Uuid) -> StoreResult<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait OfferStore: Send + Sync {
    async fn list_offers(&self) -> StoreResult<Vec<Offer>>;

    /// Offers enabled and within their validity window on `on`
    async fn list_active_offers(&self, on: NaiveDate) -> StoreResult<Vec<Offer>>;

    async fn get_offer(&self, id: Uuid) -> StoreResult<Offer>;

    async fn create_offer(&self, offer: NewOffer) -> StoreResult<Offer>;

    async fn update_offer(&self, offer: Offer) -> StoreResult<Offer>;

    async fn delete_offer(&self, id: Uuid) -> StoreResult<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn list_bookings(&self, status: Option<BookingStatus>) -> StoreResult<Vec<Booking>>;

    async fn get_booking(&self, id: Uuid) -> StoreResult<Booking>;

    async fn create_booking(&self, booking: NewBooking) -> StoreResult<Booking>;

    /// Write `booking` only if its stored status is still `expected`.
    /// A booking whose status moved on in the meantime yields [`StoreError::Stale`].
    async fn update_booking(
        &self,
        booking: Booking,
        expected: BookingStatus,
    ) -> StoreResult<Booking>;

    async fn delete_booking(&self, id: Uuid) -> StoreResult<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlogPostStore: Send + Sync {
    /// All posts, or only those matching `published` when given
    async fn list_blog_posts(&self, published: Option<bool>) -> StoreResult<Vec<BlogPost>>;

    async fn get_blog_post(&self, id: Uuid) -> StoreResult<BlogPost>;

    async fn create_blog_post(&self, post: NewBlogPost) -> StoreResult<BlogPost>;

    async fn update_blog_post(&self, post: BlogPost) -> StoreResult<BlogPost>;

    async fn delete_blog_post(&self, id: Uuid) -> StoreResult<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait FeaturePostStore: Send + Sync {
    /// Newest first; filtered on `active` when given
    async fn list_feature_posts(&self, active: Option<bool>) -> StoreResult<Vec<FeaturePost>>;

    async fn get_feature_post(&self, id: Uuid) -> StoreResult<FeaturePost>;

    async fn create_feature_post(&self, post: NewFeaturePost) -> StoreResult<FeaturePost>;

    async fn update_feature_post(&self, post: FeaturePost) -> StoreResult<FeaturePost>;

    async fn delete_feature_post(&self, id: Uuid) -> StoreResult<()>;
}
