//! Domain models shared by the store, pricing and route layers

pub mod blog;
pub mod booking;
pub mod feature_post;
pub mod offer;
pub mod room;

pub use blog::{BlogPost, BlogPostUpdate, NewBlogPost};
pub use booking::{Booking, BookingStatus, BookingUpdate, InvalidTransition, NewBooking};
pub use feature_post::{FeaturePost, FeaturePostUpdate, NewFeaturePost};
pub use offer::{NewOffer, Offer, OfferType, OfferUpdate};
pub use room::{NewRoom, Room, RoomCategory, RoomUpdate};

/// A payload failed field validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn missing(field: &str) -> Self {
        Self(format!("Missing required field: {}", field))
    }
}

/// A stored enum column held a value we don't know about
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

pub(crate) fn require(value: &str, field: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::missing(field));
    }
    Ok(())
}

pub(crate) fn default_true() -> bool {
    true
}
