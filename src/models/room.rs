//! Room models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{default_true, require, UnknownVariant, ValidationError};

/// Kind of accommodation a room offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomCategory {
    Dorm,
    Private,
}

impl RoomCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            RoomCategory::Dorm => "dorm",
            RoomCategory::Private => "private",
        }
    }
}

impl TryFrom<String> for RoomCategory {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "dorm" => Ok(RoomCategory::Dorm),
            "private" => Ok(RoomCategory::Private),
            _ => Err(UnknownVariant {
                kind: "room category",
                value,
            }),
        }
    }
}

/// Room from the rooms table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(try_from = "String")]
    pub category: RoomCategory,
    pub capacity: i32,
    /// Nightly price in whole currency units
    pub price: Decimal,
    pub description: String,
    pub amenities: Vec<String>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.name, self.capacity, self.price)
    }
}

/// Payload for creating a room
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    pub name: String,
    #[serde(rename = "type")]
    pub category: RoomCategory,
    pub capacity: i32,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default = "default_true")]
    pub available: bool,
}

impl NewRoom {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.name, self.capacity, self.price)
    }
}

/// Partial room update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<RoomCategory>,
    pub capacity: Option<i32>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub available: Option<bool>,
}

impl RoomUpdate {
    pub fn apply(self, room: &mut Room) {
        if let Some(name) = self.name {
            room.name = name;
        }
        if let Some(category) = self.category {
            room.category = category;
        }
        if let Some(capacity) = self.capacity {
            room.capacity = capacity;
        }
        if let Some(price) = self.price {
            room.price = price;
        }
        if let Some(description) = self.description {
            room.description = description;
        }
        if let Some(amenities) = self.amenities {
            room.amenities = amenities;
        }
        if let Some(available) = self.available {
            room.available = available;
        }
    }
}

fn validate_fields(name: &str, capacity: i32, price: Decimal) -> Result<(), ValidationError> {
    require(name, "name")?;
    if capacity <= 0 {
        return Err(ValidationError("Capacity must be positive".to_string()));
    }
    if price.is_sign_negative() {
        return Err(ValidationError("Price cannot be negative".to_string()));
    }
    Ok(())
}
