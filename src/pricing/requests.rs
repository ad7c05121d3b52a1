//! Request DTOs for pricing API endpoints.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

/// One cart entry: a room and how many of it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub room_id: Uuid,
    pub quantity: u32,
}

/// Request to price a stay
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub rooms: Vec<CartItemRequest>,
    /// Date used to pick active offers (default: today)
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}
