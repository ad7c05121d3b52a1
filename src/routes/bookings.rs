//! Booking route handlers
//!
//! Admin CRUD plus the guest checkout, which prices the cart server-side and
//! stores the result as a pending booking.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::booking::validate_guest;
use crate::models::{Booking, BookingStatus, BookingUpdate, NewBooking, ValidationError};
use crate::pricing::requests::{CartItemRequest, QuoteRequest};
use crate::pricing::responses::QuoteResponse;
use crate::pricing::services;
use crate::AppState;

use super::{deleted, Rejectable};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/checkout", post(checkout))
        .route("/:id", get(show).put(update).delete(destroy))
}

/// Query parameters for booking listing
#[derive(Debug, Default, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
}

/// Guest details and cart submitted from the checkout form
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub guest_name: String,
    pub email: String,
    pub phone: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default = "default_guest_count")]
    pub guest_count: i32,
    #[serde(default)]
    pub special_requests: String,
    #[serde(default)]
    pub rooms: Vec<CartItemRequest>,
}

fn default_guest_count() -> i32 {
    1
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub booking: Booking,
    pub confirmation_number: String,
    pub quote: QuoteResponse,
}

pub async fn list(
    State(state): State<AppState>,
    query: Rejectable<Query<BookingListQuery>, QueryRejection>,
) -> Result<Json<Vec<Booking>>> {
    let Query(query) = query?;
    let bookings = state
        .bookings
        .list_bookings(query.status)
        .await
        .map_err(|e| AppError::store("Booking", e))?;
    Ok(Json(bookings))
}

pub async fn show(
    State(state): State<AppState>,
    id: Rejectable<Path<Uuid>, PathRejection>,
) -> Result<Json<Booking>> {
    let Path(id) = id?;
    let booking = state
        .bookings
        .get_booking(id)
        .await
        .map_err(|e| AppError::store("Booking", e))?;
    Ok(Json(booking))
}

/// Admin-entered booking with an explicit price
pub async fn create(
    State(state): State<AppState>,
    payload: Rejectable<Json<NewBooking>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>)> {
    let Json(new_booking) = payload?;
    new_booking.validate()?;

    let booking = state
        .bookings
        .create_booking(new_booking)
        .await
        .map_err(|e| AppError::store("Booking", e))?;
    info!("Booking created: {} ({})", booking.id, booking.status);

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Price the cart and record it as a pending booking
pub async fn checkout(
    State(state): State<AppState>,
    payload: Rejectable<Json<CheckoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let Json(request) = payload?;
    validate_guest(&request.guest_name, &request.email, &request.phone)?;
    if request.guest_count < 1 {
        return Err(ValidationError("guestCount must be at least 1".to_string()).into());
    }
    if request.rooms.iter().all(|item| item.quantity == 0) {
        return Err(ValidationError::missing("rooms").into());
    }

    let totals = services::quote(
        &state,
        &QuoteRequest {
            check_in: request.check_in,
            check_out: request.check_out,
            rooms: request.rooms,
            as_of: None,
        },
    )
    .await?;

    let new_booking = NewBooking {
        guest_name: request.guest_name,
        email: request.email,
        phone: request.phone,
        room_ids: totals.lines.iter().map(|line| line.room_id).collect(),
        check_in: request.check_in,
        check_out: request.check_out,
        guest_count: request.guest_count,
        special_requests: request.special_requests,
        price: totals.grand_total,
        status: BookingStatus::Pending,
    };
    new_booking.validate()?;

    let booking = state
        .bookings
        .create_booking(new_booking)
        .await
        .map_err(|e| AppError::store("Booking", e))?;
    let confirmation_number = booking.confirmation_number();
    info!(
        "Checkout completed: {} for {} ({} nights)",
        confirmation_number, booking.price, totals.nights
    );

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            booking,
            confirmation_number,
            quote: totals.into(),
        }),
    ))
}

/// Partial update; status changes must follow the booking lifecycle
pub async fn update(
    State(state): State<AppState>,
    id: Rejectable<Path<Uuid>, PathRejection>,
    payload: Rejectable<Json<BookingUpdate>, JsonRejection>,
) -> Result<Json<Booking>> {
    let Path(id) = id?;
    let Json(changes) = payload?;

    let mut booking = state
        .bookings
        .get_booking(id)
        .await
        .map_err(|e| AppError::store("Booking", e))?;
    let previous = booking.status;
    changes.apply(&mut booking)?;
    booking.validate()?;

    let booking = state
        .bookings
        .update_booking(booking, previous)
        .await
        .map_err(|e| AppError::store("Booking", e))?;
    if booking.status != previous {
        info!("Booking {} moved from {} to {}", booking.id, previous, booking.status);
    }

    Ok(Json(booking))
}

pub async fn destroy(
    State(state): State<AppState>,
    id: Rejectable<Path<Uuid>, PathRejection>,
) -> Result<Json<Value>> {
    let Path(id) = id?;
    state
        .bookings
        .delete_booking(id)
        .await
        .map_err(|e| AppError::store("Booking", e))?;
    info!("Booking deleted: {}", id);

    Ok(Json(deleted("Booking")))
}
