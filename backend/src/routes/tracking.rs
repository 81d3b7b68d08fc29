//! Tracking routes
//!
//! Workout, meal, and water tracking. Creation attaches the authenticated
//! user; deletion takes the record id in the path and checks ownership.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::TrackingService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use fitness_planner_shared::types::{
    CreateMealTrackingRequest, CreateWaterTrackingRequest, CreateWorkoutTrackingRequest,
    MealTrackingResponse, TrackingQuery, WaterTrackingResponse, WorkoutTrackingResponse,
};
use uuid::Uuid;

/// Create tracking routes (nested under /users/me)
pub fn tracking_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/workout-tracking",
            get(list_workout_tracking).post(create_workout_tracking),
        )
        .route("/workout-tracking/:id", delete(delete_workout_tracking))
        .route(
            "/meal-tracking",
            get(list_meal_tracking).post(create_meal_tracking),
        )
        .route("/meal-tracking/:id", delete(delete_meal_tracking))
        .route(
            "/water-tracking",
            get(list_water_tracking).post(create_water_tracking),
        )
        .route("/water-tracking/:id", delete(delete_water_tracking))
}

// ----------------------------------------------------------------------
// Workout tracking
// ----------------------------------------------------------------------

/// GET /api/v1/users/me/workout-tracking?date=YYYY-MM-DD
async fn list_workout_tracking(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TrackingQuery>,
) -> ApiResult<Json<Vec<WorkoutTrackingResponse>>> {
    let records = TrackingService::list_workout(&state.db, auth.user_id, query.date).await?;
    Ok(Json(records))
}

/// POST /api/v1/users/me/workout-tracking
async fn create_workout_tracking(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateWorkoutTrackingRequest>,
) -> ApiResult<(StatusCode, Json<WorkoutTrackingResponse>)> {
    let record = TrackingService::create_workout(&state.db, auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/v1/users/me/workout-tracking/{id}
async fn delete_workout_tracking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    TrackingService::delete_workout(&state.db, auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------------------------------------------------------------
// Meal tracking
// ----------------------------------------------------------------------

/// GET /api/v1/users/me/meal-tracking?date=YYYY-MM-DD
async fn list_meal_tracking(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TrackingQuery>,
) -> ApiResult<Json<Vec<MealTrackingResponse>>> {
    let records = TrackingService::list_meal(&state.db, auth.user_id, query.date).await?;
    Ok(Json(records))
}

/// POST /api/v1/users/me/meal-tracking
async fn create_meal_tracking(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateMealTrackingRequest>,
) -> ApiResult<(StatusCode, Json<MealTrackingResponse>)> {
    let record = TrackingService::create_meal(&state.db, auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/v1/users/me/meal-tracking/{id}
async fn delete_meal_tracking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    TrackingService::delete_meal(&state.db, auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------------------------------------------------------------
// Water tracking
// ----------------------------------------------------------------------

/// GET /api/v1/users/me/water-tracking?date=YYYY-MM-DD
async fn list_water_tracking(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TrackingQuery>,
) -> ApiResult<Json<Vec<WaterTrackingResponse>>> {
    let records = TrackingService::list_water(&state.db, auth.user_id, query.date).await?;
    Ok(Json(records))
}

/// POST /api/v1/users/me/water-tracking
async fn create_water_tracking(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateWaterTrackingRequest>,
) -> ApiResult<(StatusCode, Json<WaterTrackingResponse>)> {
    let record = TrackingService::create_water(&state.db, auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/v1/users/me/water-tracking/{id}
async fn delete_water_tracking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    TrackingService::delete_water(&state.db, auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
