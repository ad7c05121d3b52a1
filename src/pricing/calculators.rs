//! Core pricing calculation functions.
//!
//! Pure functions for booking math - no database access. Every amount is in
//! whole currency units and rounding happens per line (discounts) and once on
//! the discounted total (tax).

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::models::{Offer, OfferType};

/// Tax charged on the discounted total
pub const TAX_RATE: Decimal = dec!(0.12);

/// Round to whole currency units, halves away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use hideout_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5)), dec!(3));
/// assert_eq!(round_money(dec!(647.4)), dec!(647));
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Nights between two calendar dates, never less than one.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    let days = (check_out - check_in).num_days().max(1);
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// One room type selected with a quantity, priced at selection time
#[derive(Debug, Clone, PartialEq)]
pub struct BookingLine {
    pub room_id: Uuid,
    pub name: String,
    /// Nightly price per unit
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Pricing of a single line
#[derive(Debug, Clone, PartialEq)]
pub struct LineTotals {
    pub room_id: Uuid,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    /// `unit_price * quantity * nights`
    pub base_amount: Decimal,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    /// Title of the offer that discounted this line
    pub offer_title: Option<String>,
}

/// Discount attributed to one offer across all lines it won
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedOffer {
    pub title: String,
    pub amount: Decimal,
}

/// Result of [`compute_booking_total`]
#[derive(Debug, Clone, PartialEq)]
pub struct BookingTotals {
    pub nights: u32,
    pub lines: Vec<LineTotals>,
    pub subtotal: Decimal,
    pub total_discount: Decimal,
    pub discounted_total: Decimal,
    pub tax: Decimal,
    pub grand_total: Decimal,
    pub applied_offers: Vec<AppliedOffer>,
}

/// Price a stay.
///
/// Each line gets at most one discount: the best eligible `duration`,
/// `room_specific` and `all` offers are found, and the highest rate among
/// them applies. Rates never stack. `active_offers` must already be limited
/// to offers valid on the booking's reference date.
pub fn compute_booking_total(
    nights: u32,
    lines: &[BookingLine],
    active_offers: &[Offer],
) -> BookingTotals {
    let nights = nights.max(1);
    let mut subtotal = Decimal::ZERO;
    let mut total_discount = Decimal::ZERO;
    let mut applied_offers: Vec<AppliedOffer> = Vec::new();
    let mut line_totals = Vec::with_capacity(lines.len());

    for line in lines {
        let base_amount = line.unit_price * Decimal::from(line.quantity) * Decimal::from(nights);
        let offer = best_offer(line.room_id, nights, active_offers);

        let (discount_percent, discount_amount) = match offer {
            Some(offer) => (
                offer.discount,
                round_money(base_amount * offer.discount / Decimal::ONE_HUNDRED),
            ),
            None => (Decimal::ZERO, Decimal::ZERO),
        };

        if let Some(offer) = offer {
            match applied_offers.iter_mut().find(|a| a.title == offer.title) {
                Some(applied) => applied.amount += discount_amount,
                None => applied_offers.push(AppliedOffer {
                    title: offer.title.clone(),
                    amount: discount_amount,
                }),
            }
        }

        subtotal += base_amount;
        total_discount += discount_amount;

        line_totals.push(LineTotals {
            room_id: line.room_id,
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            base_amount,
            discount_percent,
            discount_amount,
            offer_title: offer.map(|o| o.title.clone()),
        });
    }

    let discounted_total = subtotal - total_discount;
    let tax = round_money(discounted_total * TAX_RATE);

    BookingTotals {
        nights,
        lines: line_totals,
        subtotal,
        total_discount,
        discounted_total,
        tax,
        grand_total: discounted_total + tax,
        applied_offers,
    }
}

/// The single offer that discounts a line, if any.
///
/// On equal rates the earlier offer wins within a type, and across types
/// `duration` beats `room_specific` beats `all`.
fn best_offer(room_id: Uuid, nights: u32, offers: &[Offer]) -> Option<&Offer> {
    strongest(
        [OfferType::Duration, OfferType::RoomSpecific, OfferType::All]
            .into_iter()
            .filter_map(|offer_type| best_of_type(offer_type, room_id, nights, offers)),
    )
}

fn best_of_type(
    offer_type: OfferType,
    room_id: Uuid,
    nights: u32,
    offers: &[Offer],
) -> Option<&Offer> {
    strongest(
        offers
            .iter()
            .filter(|o| o.offer_type == offer_type && o.is_eligible(room_id, nights)),
    )
}

fn strongest<'a>(candidates: impl Iterator<Item = &'a Offer>) -> Option<&'a Offer> {
    candidates.fold(None, |best, offer| match best {
        Some(current) if current.discount >= offer.discount => Some(current),
        _ => Some(offer),
    })
}
