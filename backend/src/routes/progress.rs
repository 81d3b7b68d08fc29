//! Daily progress route

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::ProgressService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use fitness_planner_shared::types::{DailyProgressResponse, ProgressQuery};

/// Create progress routes (nested under /users/me)
pub fn progress_routes() -> Router<AppState> {
    Router::new().route("/daily-progress", get(daily_progress))
}

/// GET /api/v1/users/me/daily-progress
///
/// `?date=YYYY-MM-DD` for a single day, `?start_date=&end_date=` for an
/// inclusive range, or no parameters for today.
async fn daily_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ProgressQuery>,
) -> ApiResult<Json<DailyProgressResponse>> {
    let response = ProgressService::daily_progress(&state.db, auth.user_id, query).await?;
    Ok(Json(response))
}
