//! Authenticated user routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use fitness_planner_shared::types::{UpdateUserRequest, UserResponse};

/// Create user routes (nested under /users/me)
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", get(me).patch(update_me).put(update_me))
}

/// GET /api/v1/users/me
async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    let user = UserService::get_me(&state.db, auth.user_id).await?;
    Ok(Json(user))
}

/// PATCH/PUT /api/v1/users/me
///
/// Both verbs merge the provided fields; the account's identity fields have
/// no meaningful "clear" semantics.
async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::update_me(&state.db, auth.user_id, req).await?;
    Ok(Json(user))
}
