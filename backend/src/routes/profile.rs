//! Profile routes
//!
//! One profile per user: POST conflicts if one exists, GET/PUT/PATCH are
//! not-found without one.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use fitness_planner_shared::types::{ProfileInput, ProfileResponse};

/// Create profile routes (nested under /users/me/profile)
pub fn profile_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_profile)
            .post(create_profile)
            .put(replace_profile)
            .patch(patch_profile),
    )
}

/// GET /api/v1/users/me/profile
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = ProfileService::get(&state.db, auth.user_id).await?;
    Ok(Json(profile))
}

/// POST /api/v1/users/me/profile
async fn create_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ProfileInput>,
) -> ApiResult<(StatusCode, Json<ProfileResponse>)> {
    let profile = ProfileService::create(&state.db, auth.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// PUT /api/v1/users/me/profile - full replace
async fn replace_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ProfileInput>,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = ProfileService::update(&state.db, auth.user_id, input, false).await?;
    Ok(Json(profile))
}

/// PATCH /api/v1/users/me/profile - partial update
async fn patch_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ProfileInput>,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = ProfileService::update(&state.db, auth.user_id, input, true).await?;
    Ok(Json(profile))
}
