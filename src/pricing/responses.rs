//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calculators::{AppliedOffer, BookingTotals, LineTotals};

/// One priced line of the booking summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineQuoteResponse {
    pub room_id: Uuid,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_percent: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub offer: Option<String>,
}

/// Discount attributed to one offer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedOfferResponse {
    pub title: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// Response for a booking summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub nights: u32,
    pub lines: Vec<LineQuoteResponse>,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_discount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discounted_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub grand_total: Decimal,
    pub applied_offers: Vec<AppliedOfferResponse>,
}

impl From<LineTotals> for LineQuoteResponse {
    fn from(line: LineTotals) -> Self {
        Self {
            room_id: line.room_id,
            name: line.name,
            unit_price: line.unit_price,
            quantity: line.quantity,
            amount: line.base_amount,
            discount_percent: line.discount_percent,
            discount: line.discount_amount,
            offer: line.offer_title,
        }
    }
}

impl From<AppliedOffer> for AppliedOfferResponse {
    fn from(applied: AppliedOffer) -> Self {
        Self {
            title: applied.title,
            amount: applied.amount,
        }
    }
}

impl From<BookingTotals> for QuoteResponse {
    fn from(totals: BookingTotals) -> Self {
        Self {
            nights: totals.nights,
            lines: totals.lines.into_iter().map(Into::into).collect(),
            subtotal: totals.subtotal,
            total_discount: totals.total_discount,
            discounted_total: totals.discounted_total,
            tax: totals.tax,
            grand_total: totals.grand_total,
            applied_offers: totals.applied_offers.into_iter().map(Into::into).collect(),
        }
    }
}
