//! Route definitions for the Fitness Planner API
//!
//! Organizes all API routes and applies the middleware stack.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod health;
mod plans;
mod profile;
mod progress;
mod tracking;
mod users;


/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        // Generation can take a while; the request timeout must outlive the
        // generator timeout so the fallback path still answers in time
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(90)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Fitness Planner API v1" }))
        .nest("/auth", auth::auth_routes())
        .nest("/users/me", me_routes())
}

/// Everything scoped to the authenticated user
fn me_routes() -> Router<AppState> {
    Router::new()
        .merge(users::user_routes())
        .nest("/profile", profile::profile_routes())
        .nest("/plans", plans::plan_routes())
        .merge(tracking::tracking_routes())
        .merge(progress::progress_routes())
}
