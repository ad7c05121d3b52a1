//! HTTP routes for the pricing engine

use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};

use crate::error::Result;
use crate::routes::Rejectable;
use crate::AppState;

use super::requests::QuoteRequest;
use super::responses::QuoteResponse;
use super::services;

pub fn router() -> Router<AppState> {
    Router::new().route("/quote", post(quote))
}

/// Booking summary for a cart of rooms
async fn quote(
    State(state): State<AppState>,
    payload: Rejectable<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>> {
    let Json(request) = payload?;
    let totals = services::quote(&state, &request).await?;
    Ok(Json(totals.into()))
}
