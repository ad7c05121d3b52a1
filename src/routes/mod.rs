//! HTTP routing

pub mod blogs;
pub mod bookings;
pub mod feature_posts;
pub mod health;
pub mod offers;
pub mod rooms;

use axum::{http::HeaderValue, routing::get, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::Config;
use crate::AppState;

/// Every `/api` route, without middleware or state
pub fn api_router() -> Router<AppState> {
    let api = Router::new()
        .route("/health", get(health::health))
        .nest("/rooms", rooms::router())
        .nest("/offers", offers::router())
        .nest("/bookings", bookings::router())
        .nest("/blogs", blogs::router())
        .nest("/feature-posts", feature_posts::router())
        .nest("/pricing", crate::pricing::router());

    Router::new().nest("/api", api)
}

/// The full application: routes, tracing, compression and CORS
pub fn router(state: AppState, config: &Config) -> Router {
    api_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors_layer(config)),
        )
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let Some(origin) = config.cors_allowed_origin.as_deref() else {
        return CorsLayer::permissive();
    };

    match HeaderValue::from_str(origin) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(e) => {
            warn!("Ignoring invalid CORS_ALLOWED_ORIGIN '{}': {}", origin, e);
            CorsLayer::permissive()
        }
    }
}

/// An extractor result, so rejections become JSON `AppError`s
pub(crate) type Rejectable<T, R> = std::result::Result<T, R>;

/// Body returned by every delete route
pub(crate) fn deleted(entity: &str) -> Value {
    json!({ "message": format!("{} deleted successfully", entity) })
}
