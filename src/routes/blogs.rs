//! Blog route handlers

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
use crate::models::{BlogPost, BlogPostUpdate, NewBlogPost};
use crate::AppState;

use super::{deleted, Rejectable};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(show).put(update).delete(destroy))
}

/// Query parameters for blog listing
#[derive(Debug, Default, Deserialize)]
pub struct BlogListQuery {
    pub published: Option<bool>,
}

/// Blog listing, newest first
pub async fn list(
    State(state): State<AppState>,
    query: Rejectable<Query<BlogListQuery>, QueryRejection>,
) -> Result<Json<Vec<BlogPost>>> {
    let Query(query) = query?;
    let key = AppCache::blog_posts_key(query.published);

    let posts = state
        .cache
        .blog_posts
        .get_or_try_load(key, || state.blog_posts.list_blog_posts(query.published))
        .await
        .map_err(|e| AppError::store("Blog post", e))?;

    Ok(Json(posts.as_ref().clone()))
}

pub async fn show(
    State(state): State<AppState>,
    id: Rejectable<Path<Uuid>, PathRejection>,
) -> Result<Json<BlogPost>> {
    let Path(id) = id?;
    let post = state
        .blog_posts
        .get_blog_post(id)
        .await
        .map_err(|e| AppError::store("Blog post", e))?;
    Ok(Json(post))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Rejectable<Json<NewBlogPost>, JsonRejection>,
) -> Result<(StatusCode, Json<BlogPost>)> {
    let Json(new_post) = payload?;
    new_post.validate()?;

    let post = state
        .blog_posts
        .create_blog_post(new_post)
        .await
        .map_err(|e| AppError::store("Blog post", e))?;
    state.cache.invalidate_blog_posts();
    info!("Blog post created: {} ({})", post.title, post.id);

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update(
    State(state): State<AppState>,
    id: Rejectable<Path<Uuid>, PathRejection>,
    payload: Rejectable<Json<BlogPostUpdate>, JsonRejection>,
) -> Result<Json<BlogPost>> {
    let Path(id) = id?;
    let Json(changes) = payload?;

    let mut post = state
        .blog_posts
        .get_blog_post(id)
        .await
        .map_err(|e| AppError::store("Blog post", e))?;
    changes.apply(&mut post);
    post.validate()?;

    let post = state
        .blog_posts
        .update_blog_post(post)
        .await
        .map_err(|e| AppError::store("Blog post", e))?;
    state.cache.invalidate_blog_posts();
    info!("Blog post updated: {}", post.id);

    Ok(Json(post))
}

pub async fn destroy(
    State(state): State<AppState>,
    id: Rejectable<Path<Uuid>, PathRejection>,
) -> Result<Json<Value>> {
    let Path(id) = id?;
    state
        .blog_posts
        .delete_blog_post(id)
        .await
        .map_err(|e| AppError::store("Blog post", e))?;
    state.cache.invalidate_blog_posts();
    info!("Blog post deleted: {}", id);

    Ok(Json(deleted("Blog post")))
}
