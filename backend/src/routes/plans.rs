//! Fitness plan routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::PlanService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use fitness_planner_shared::types::{CreatePlanRequest, FitnessPlanResponse, PlanCreatedResponse};
use uuid::Uuid;

/// Create plan routes (nested under /users/me/plans)
pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .route("/:id", delete(delete_plan))
}

/// GET /api/v1/users/me/plans
async fn list_plans(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<FitnessPlanResponse>>> {
    let plans = PlanService::list_plans(&state.db, auth.user_id).await?;
    Ok(Json(plans))
}

/// POST /api/v1/users/me/plans
///
/// Generates the plan content synchronously. This is the one slow endpoint;
/// in a larger deployment the generation call belongs on a background worker.
async fn create_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePlanRequest>,
) -> ApiResult<(StatusCode, Json<PlanCreatedResponse>)> {
    let plan = PlanService::create_plan(
        &state.db,
        state.generator(),
        &state.config().ai,
        auth.user_id,
        req,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(PlanCreatedResponse {
            message: "Fitness plan generated successfully".to_string(),
            plan,
        }),
    ))
}

/// DELETE /api/v1/users/me/plans/{id}
async fn delete_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    PlanService::delete_plan(&state.db, auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
