//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{auth, channels, health, users};
use crate::state::AppState;

/// Prefix every route is mounted under
pub const API_PREFIX: &str = "/api/v1";

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest(API_PREFIX, api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route(&format!("{API_PREFIX}/health"), get(health::health_check))
        .route(&format!("{API_PREFIX}/health/ready"), get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(channel_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/change-password", post(auth::change_password))
}

/// Current account routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/me",
            get(users::get_current_account)
                .patch(users::update_current_account)
                .delete(users::delete_current_account),
        )
        .route("/users/me/avatar", patch(users::update_avatar))
        .route("/users/me/cover-image", patch(users::update_cover_image))
        .route("/users/me/history", get(users::get_watch_history))
}

/// Channel routes
fn channel_routes() -> Router<AppState> {
    Router::new().route("/channels/:username", get(channels::get_channel_profile))
}
