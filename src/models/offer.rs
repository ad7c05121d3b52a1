//! Promotional offer models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{default_true, require, UnknownVariant, ValidationError};

/// Which booking lines an offer can discount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferType {
    /// Every room line
    #[default]
    All,
    /// Only rooms listed in `applicable_rooms`
    RoomSpecific,
    /// Stays of at least `min_days` nights
    Duration,
}

impl OfferType {
    pub fn as_str(self) -> &'static str {
        match self {
            OfferType::All => "all",
            OfferType::RoomSpecific => "room_specific",
            OfferType::Duration => "duration",
        }
    }
}

impl TryFrom<String> for OfferType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "all" => Ok(OfferType::All),
            "room_specific" => Ok(OfferType::RoomSpecific),
            "duration" => Ok(OfferType::Duration),
            _ => Err(UnknownVariant {
                kind: "offer type",
                value,
            }),
        }
    }
}

/// Offer from the offers table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Discount percentage, 0 to 100
    pub discount: Decimal,
    #[sqlx(try_from = "String")]
    pub offer_type: OfferType,
    pub applicable_rooms: Vec<Uuid>,
    pub min_days: i32,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    pub code: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Offer {
    /// Enabled and inside its validity window (both ends inclusive)
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.active && self.valid_from <= day && day <= self.valid_to
    }

    /// Whether this offer may discount a line for `room_id` over `nights` nights.
    ///
    /// Activity is not checked here; callers pass offers already filtered
    /// with [`Offer::is_active_on`].
    pub fn is_eligible(&self, room_id: Uuid, nights: u32) -> bool {
        match self.offer_type {
            OfferType::All => true,
            OfferType::RoomSpecific => self.applicable_rooms.contains(&room_id),
            OfferType::Duration => i64::from(nights) >= i64::from(self.min_days),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.title,
            &self.description,
            &self.code,
            self.discount,
            self.valid_from,
            self.valid_to,
            self.min_days,
        )
    }
}

/// Payload for creating an offer
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOffer {
    pub title: String,
    pub description: String,
    pub discount: Decimal,
    #[serde(default)]
    pub offer_type: OfferType,
    #[serde(default)]
    pub applicable_rooms: Vec<Uuid>,
    #[serde(default)]
    pub min_days: i32,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    pub code: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl NewOffer {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.title,
            &self.description,
            &self.code,
            self.discount,
            self.valid_from,
            self.valid_to,
            self.min_days,
        )
    }
}

/// Partial offer update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub discount: Option<Decimal>,
    pub offer_type: Option<OfferType>,
    pub applicable_rooms: Option<Vec<Uuid>>,
    pub min_days: Option<i32>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub code: Option<String>,
    pub active: Option<bool>,
}

impl OfferUpdate {
    pub fn apply(self, offer: &mut Offer) {
        if let Some(title) = self.title {
            offer.title = title;
        }
        if let Some(description) = self.description {
            offer.description = description;
        }
        if let Some(discount) = self.discount {
            offer.discount = discount;
        }
        if let Some(offer_type) = self.offer_type {
            offer.offer_type = offer_type;
        }
        if let Some(rooms) = self.applicable_rooms {
            offer.applicable_rooms = rooms;
        }
        if let Some(min_days) = self.min_days {
            offer.min_days = min_days;
        }
        if let Some(valid_from) = self.valid_from {
            offer.valid_from = valid_from;
        }
        if let Some(valid_to) = self.valid_to {
            offer.valid_to = valid_to;
        }
        if let Some(code) = self.code {
            offer.code = code;
        }
        if let Some(active) = self.active {
            offer.active = active;
        }
    }
}

fn validate_fields(
    title: &str,
    description: &str,
    code: &str,
    discount: Decimal,
    valid_from: NaiveDate,
    valid_to: NaiveDate,
    min_days: i32,
) -> Result<(), ValidationError> {
    require(title, "title")?;
    require(description, "description")?;
    require(code, "code")?;
    if discount < Decimal::ZERO || discount > Decimal::ONE_HUNDRED {
        return Err(ValidationError(
            "Discount must be between 0 and 100".to_string(),
        ));
    }
    if valid_from > valid_to {
        return Err(ValidationError(
            "validFrom must not be after validTo".to_string(),
        ));
    }
    if min_days < 0 {
        return Err(ValidationError("minDays cannot be negative".to_string()));
    }
    Ok(())
}
