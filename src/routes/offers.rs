//! Offer route handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::{AppError, Result};
use crate::models::{NewOffer, Offer, OfferUpdate};
use crate::pricing::services::active_offers;
use crate::AppState;

use super::{deleted, Rejectable};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/active", get(active))
        .route("/:id", get(show).put(update).delete(destroy))
}

/// Query parameters for the active offer listing
#[derive(Debug, Default, Deserialize)]
pub struct ActiveOfferQuery {
    /// Reference date (default: today)
    pub on: Option<NaiveDate>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Offer>>> {
    let key = AppCache::all_offers_key();

    let offers = state
        .cache
        .offers
        .get_or_try_load(key, || state.offers.list_offers())
        .await
        .map_err(|e| AppError::store("Offer", e))?;

    Ok(Json(offers.as_ref().clone()))
}

/// Offers the public site may show on a date
pub async fn active(
    State(state): State<AppState>,
    query: Rejectable<Query<ActiveOfferQuery>, QueryRejection>,
) -> Result<Json<Vec<Offer>>> {
    let Query(query) = query?;
    let on = query.on.unwrap_or_else(|| Utc::now().date_naive());

    let offers = active_offers(&state, on)
        .await
        .map_err(|e| AppError::store("Offer", e))?;
    Ok(Json(offers.as_ref().clone()))
}

pub async fn show(
    State(state): State<AppState>,
    id: Rejectable<Path<Uuid>, PathRejection>,
) -> Result<Json<Offer>> {
    let Path(id) = id?;
    let offer = state
        .offers
        .get_offer(id)
        .await
        .map_err(|e| AppError::store("Offer", e))?;
    Ok(Json(offer))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Rejectable<Json<NewOffer>, JsonRejection>,
) -> Result<(StatusCode, Json<Offer>)> {
    let Json(new_offer) = payload?;
    new_offer.validate()?;

    let offer = state
        .offers
        .create_offer(new_offer)
        .await
        .map_err(|e| AppError::store("Offer", e))?;
    state.cache.invalidate_offers();
    info!("Offer created: {} ({})", offer.code, offer.id);

    Ok((StatusCode::CREATED, Json(offer)))
}

pub async fn update(
    State(state): State<AppState>,
    id: Rejectable<Path<Uuid>, PathRejection>,
    payload: Rejectable<Json<OfferUpdate>, JsonRejection>,
) -> Result<Json<Offer>> {
    let Path(id) = id?;
    let Json(changes) = payload?;

    let mut offer = state
        .offers
        .get_offer(id)
        .await
        .map_err(|e| AppError::store("Offer", e))?;
    changes.apply(&mut offer);
    offer.validate()?;

    let offer = state
        .offers
        .update_offer(offer)
        .await
        .map_err(|e| AppError::store("Offer", e))?;
    state.cache.invalidate_offers();
    info!("Offer updated: {}", offer.id);

    Ok(Json(offer))
}

pub async fn destroy(
    State(state): State<AppState>,
    id: Rejectable<Path<Uuid>, PathRejection>,
) -> Result<Json<Value>> {
    let Path(id) = id?;
    state
        .offers
        .delete_offer(id)
        .await
        .map_err(|e| AppError::store("Offer", e))?;
    state.cache.invalidate_offers();
    info!("Offer deleted: {}", id);

    Ok(Json(deleted("Offer")))
}
