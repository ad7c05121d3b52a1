//! Pricing engine for room bookings.
//!
//! Turns a cart of rooms and a stay into a booking summary: per-line offer
//! discounts, tax on the discounted total, and the offers that contributed.

pub mod calculators;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{compute_booking_total, nights_between, round_money, BookingTotals};
pub use routes::router;
pub use services::PricingError;
