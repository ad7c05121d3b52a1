//! Feature post (Instagram highlight) route handlers

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
use crate::models::{FeaturePost, FeaturePostUpdate, NewFeaturePost};
use crate::AppState;

use super::{deleted, Rejectable};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(show).put(update).delete(destroy))
}

#[derive(Debug, Default, Deserialize)]
pub struct FeaturePostListQuery {
    pub active: Option<bool>,
}

pub async fn list(
    State(state): State<AppState>,
    query: Rejectable<Query<FeaturePostListQuery>, QueryRejection>,
) -> Result<Json<Vec<FeaturePost>>> {
    let Query(query) = query?;
    let key = AppCache::feature_posts_key(query.active);

    let posts = state
        .cache
        .feature_posts
        .get_or_try_load(key, || state.feature_posts.list_feature_posts(query.active))
        .await
        .map_err(|e| AppError::store("Feature post", e))?;

    Ok(Json(posts.as_ref().clone()))
}

pub async fn show(
    State(state): State<AppState>,
    id: Rejectable<Path<Uuid>, PathRejection>,
) -> Result<Json<FeaturePost>> {
    let Path(id) = id?;
    let post = state
        .feature_posts
        .get_feature_post(id)
        .await
        .map_err(|e| AppError::store("Feature post", e))?;
    Ok(Json(post))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Rejectable<Json<NewFeaturePost>, JsonRejection>,
) -> Result<(StatusCode, Json<FeaturePost>)> {
    let Json(new_post) = payload?;
    new_post.validate()?;

    let post = state
        .feature_posts
        .create_feature_post(new_post)
        .await
        .map_err(|e| AppError::store("Feature post", e))?;
    state.cache.invalidate_feature_posts();
    info!("Feature post created: {}", post.id);

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update(
    State(state): State<AppState>,
    id: Rejectable<Path<Uuid>, PathRejection>,
    payload: Rejectable<Json<FeaturePostUpdate>, JsonRejection>,
) -> Result<Json<FeaturePost>> {
    let Path(id) = id?;
    let Json(changes) = payload?;

    let mut post = state
        .feature_posts
        .get_feature_post(id)
        .await
        .map_err(|e| AppError::store("Feature post", e))?;
    changes.apply(&mut post);
    post.validate()?;

    let post = state
        .feature_posts
        .update_feature_post(post)
        .await
        .map_err(|e| AppError::store("Feature post", e))?;
    state.cache.invalidate_feature_posts();
    info!("Feature post updated: {}", post.id);

    Ok(Json(post))
}

pub async fn destroy(
    State(state): State<AppState>,
    id: Rejectable<Path<Uuid>, PathRejection>,
) -> Result<Json<Value>> {
    let Path(id) = id?;
    state
        .feature_posts
        .delete_feature_post(id)
        .await
        .map_err(|e| AppError::store("Feature post", e))?;
    state.cache.invalidate_feature_posts();
    info!("Feature post deleted: {}", id);

    Ok(Json(deleted("Feature post")))
}

#[cfg(test)]
mod tests {
    use axum::http::Method;
    use serde_json::json;

    use crate::test_helpers::{feature_post, send, TestStores};

    use super::*;

    #[tokio::test]
    async fn test_active_listing() {
        let mut stores = TestStores::default();
        stores
            .feature_posts
            .expect_list_feature_posts()
            .withf(|active| *active == Some(true))
            .times(1)
            .returning(|_| Ok(vec![feature_post(true)]));
        let app = stores.into_router();

        let (status, body) = send(app.clone(), Method::GET, "/api/feature-posts?active=true", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["active"], true);
        assert!(body[0]["instagramUrl"].is_string());

        // Cached
        let (status, _) = send(app, Method::GET, "/api/feature-posts?active=true", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_requires_image() {
        let mut stores = TestStores::default();
        stores.feature_posts.expect_create_feature_post().never();

        let (status, body) = send(
            stores.into_router(),
            Method::POST,
            "/api/feature-posts",
            Some(json!({ "image": "", "instagramUrl": "https://instagram.com/p/x" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Missing required field: image");
    }

    #[tokio::test]
    async fn test_deactivate() {
        let post = feature_post(true);
        let id = post.id;

        let mut stores = TestStores::default();
        stores
            .feature_posts
            .expect_get_feature_post()
            .returning(move |_| Ok(post.clone()));
        stores
            .feature_posts
            .expect_update_feature_post()
            .withf(|p| !p.active)
            .times(1)
            .returning(|p| Ok(p));

        let (status, body) = send(
            stores.into_router(),
            Method::PUT,
            &format!("/api/feature-posts/{}", id),
            Some(json!({ "active": false })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["active"], false);
    }
}
