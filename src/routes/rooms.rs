//! Room route handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::{AppError, Result};
use crate::models::{NewRoom, Room, RoomUpdate};
use crate::AppState;

use super::{deleted, Rejectable};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(show).put(update).delete(destroy))
}

/// Query parameters for room listing
#[derive(Debug, Default, Deserialize)]
pub struct RoomListQuery {
    /// Only rooms open for booking
    #[serde(default)]
    pub available: Option<bool>,
}

pub async fn list(
    State(state): State<AppState>,
    query: Rejectable<Query<RoomListQuery>, QueryRejection>,
) -> Result<Json<Vec<Room>>> {
    let Query(query) = query?;
    let available_only = query.available.unwrap_or(false);
    let key = AppCache::rooms_key(available_only);

    let rooms = state
        .cache
        .rooms
        .get_or_try_load(key, || async {
            state.rooms.list_rooms().await.map(|mut rooms| {
                if available_only {
                    rooms.retain(|room| room.available);
                }
                rooms
            })
        })
        .await
        .map_err(|e| AppError::store("Room", e))?;

    Ok(Json(rooms.as_ref().clone()))
}

pub async fn show(
    State(state): State<AppState>,
    id: Rejectable<Path<Uuid>, PathRejection>,
) -> Result<Json<Room>> {
    let Path(id) = id?;
    let room = state
        .rooms
        .get_room(id)
        .await
        .map_err(|e| AppError::store("Room", e))?;
    Ok(Json(room))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Rejectable<Json<NewRoom>, JsonRejection>,
) -> Result<(StatusCode, Json<Room>)> {
    let Json(new_room) = payload?;
    new_room.validate()?;

    let room = state
        .rooms
        .create_room(new_room)
        .await
        .map_err(|e| AppError::store("Room", e))?;
    state.cache.invalidate_rooms();
    info!("Room created: {} ({})", room.name, room.id);

    Ok((StatusCode::CREATED, Json(room)))
}

pub async fn update(
    State(state): State<AppState>,
    id: Rejectable<Path<Uuid>, PathRejection>,
    payload: Rejectable<Json<RoomUpdate>, JsonRejection>,
) -> Result<Json<Room>> {
    let Path(id) = id?;
    let Json(changes) = payload?;

    let mut room = state
        .rooms
        .get_room(id)
        .await
        .map_err(|e| AppError::store("Room", e))?;
    changes.apply(&mut room);
    room.validate()?;

    let room = state
        .rooms
        .update_room(room)
        .await
        .map_err(|e| AppError::store("Room", e))?;
    state.cache.invalidate_rooms();
    info!("Room updated: {}", room.id);

    Ok(Json(room))
}

pub async fn destroy(
    State(state): State<AppState>,
    id: Rejectable<Path<Uuid>, PathRejection>,
) -> Result<Json<Value>> {
    let Path(id) = id?;
    state
        .rooms
        .delete_room(id)
        .await
        .map_err(|e| AppError::store("Room", e))?;
    state.cache.invalidate_rooms();
    info!("Room deleted: {}", id);

    Ok(Json(deleted("Room")))
}

#[cfg(test)]
mod tests {
    use axum::http::Method;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use crate::models::RoomCategory;
    use crate::store::StoreError;
    use crate::test_helpers::{room, send, TestStores};

    use super::*;

    #[tokio::test]
    async fn test_list_is_cached_until_a_room_changes() {
        let dorm = room("Mountain View Dorm", RoomCategory::Dorm, dec!(500));
        let created = room("Garden Tent", RoomCategory::Dorm, dec!(300));

        let mut stores = TestStores::default();
        stores
            .rooms
            .expect_list_rooms()
            .times(2)
            .returning(move || Ok(vec![dorm.clone()]));
        stores
            .rooms
            .expect_create_room()
            .times(1)
            .returning(move |_| Ok(created.clone()));
        let app = stores.into_router();

        let (status, body) = send(app.clone(), Method::GET, "/api/rooms", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "Mountain View Dorm");
        assert_eq!(body[0]["type"], "dorm");

        // Served from the cache
        send(app.clone(), Method::GET, "/api/rooms", None).await;

        let (status, _) = send(
            app.clone(),
            Method::POST,
            "/api/rooms",
            Some(json!({ "name": "Garden Tent", "type": "dorm", "capacity": 4, "price": "300" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        // Creation invalidated the listing
        send(app, Method::GET, "/api/rooms", None).await;
    }

    #[tokio::test]
    async fn test_list_available_only() {
        let open = room("Private Cottage", RoomCategory::Private, dec!(1500));
        let mut closed = room("Luxury Suite", RoomCategory::Private, dec!(2500));
        closed.available = false;

        let mut stores = TestStores::default();
        stores
            .rooms
            .expect_list_rooms()
            .returning(move || Ok(vec![open.clone(), closed.clone()]));

        let (status, body) = send(
            stores.into_router(),
            Method::GET,
            "/api/rooms?available=true",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["name"], "Private Cottage");
    }

    #[tokio::test]
    async fn test_create_missing_name_is_400() {
        let mut stores = TestStores::default();
        stores.rooms.expect_create_room().never();

        let (status, body) = send(
            stores.into_router(),
            Method::POST,
            "/api/rooms",
            Some(json!({ "name": " ", "type": "private", "capacity": 2, "price": "1500" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Missing required field: name");
    }

    #[tokio::test]
    async fn test_update_merges_supplied_fields() {
        let cottage = room("Private Cottage", RoomCategory::Private, dec!(1500));
        let id = cottage.id;

        let mut stores = TestStores::default();
        stores
            .rooms
            .expect_get_room()
            .returning(move |_| Ok(cottage.clone()));
        stores
            .rooms
            .expect_update_room()
            .withf(|room| room.price == dec!(1800) && room.name == "Private Cottage")
            .times(1)
            .returning(|room| Ok(room));

        let (status, body) = send(
            stores.into_router(),
            Method::PUT,
            &format!("/api/rooms/{}", id),
            Some(json!({ "price": "1800" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["price"], "1800");
    }

    #[tokio::test]
    async fn test_unknown_room_is_404() {
        let mut stores = TestStores::default();
        stores
            .rooms
            .expect_get_room()
            .returning(|_| Err(StoreError::NotFound));

        let (status, body) = send(
            stores.into_router(),
            Method::GET,
            &format!("/api/rooms/{}", Uuid::new_v4()),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Room not found");
    }

    #[tokio::test]
    async fn test_delete_returns_message() {
        let mut stores = TestStores::default();
        stores
            .rooms
            .expect_delete_room()
            .times(1)
            .returning(|_| Ok(()));

        let (status, body) = send(
            stores.into_router(),
            Method::DELETE,
            &format!("/api/rooms/{}", Uuid::new_v4()),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Room deleted successfully");
    }

    #[tokio::test]
    async fn test_bad_id_is_400() {
        let (status, body) = send(
            TestStores::default().into_router(),
            Method::GET,
            "/api/rooms/not-a-uuid",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }
}
