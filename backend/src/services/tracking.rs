//! Tracking service
//!
//! Creation auto-attaches the authenticated user and verifies the referenced
//! plan item exists; deletion requires both the record id and ownership.
//! Duplicate (user, item, date) rows surface as conflicts via the unique
//! constraints.

use crate::error::ApiError;
use crate::repositories::{
    CreateMealTracking, CreateWaterTracking, CreateWorkoutTracking, MealTrackingRecord,
    PlanRepository, TrackingRepository, WaterTrackingRecord, WorkoutTrackingRecord,
};
use chrono::NaiveDate;
use fitness_planner_shared::types::{
    CreateMealTrackingRequest, CreateWaterTrackingRequest, CreateWorkoutTrackingRequest,
    MealTrackingResponse, WaterTrackingResponse, WorkoutTrackingResponse,
};
use fitness_planner_shared::validation;
use sqlx::PgPool;
use uuid::Uuid;

/// Tracking service
pub struct TrackingService;

impl TrackingService {
    // ------------------------------------------------------------------
    // Workout tracking
    // ------------------------------------------------------------------

    pub async fn create_workout(
        pool: &PgPool,
        user_id: Uuid,
        req: CreateWorkoutTrackingRequest,
    ) -> Result<WorkoutTrackingResponse, ApiError> {
        if req.sets_completed < 0 {
            return Err(ApiError::Validation(
                "sets_completed cannot be negative".to_string(),
            ));
        }
        if !PlanRepository::exercise_exists(pool, req.exercise_id).await? {
            return Err(ApiError::NotFound("Exercise not found".to_string()));
        }

        let record = TrackingRepository::create_workout(
            pool,
            CreateWorkoutTracking {
                user_id,
                exercise_id: req.exercise_id,
                date_completed: req.date_completed,
                sets_completed: req.sets_completed,
                notes: req.notes.unwrap_or_default(),
            },
        )
        .await?;

        Ok(Self::workout_response(record))
    }

    pub async fn list_workout(
        pool: &PgPool,
        user_id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<Vec<WorkoutTrackingResponse>, ApiError> {
        let records = TrackingRepository::list_workout(pool, user_id, date).await?;
        Ok(records.into_iter().map(Self::workout_response).collect())
    }

    pub async fn delete_workout(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        if !TrackingRepository::delete_workout(pool, id, user_id).await? {
            return Err(ApiError::NotFound("Tracking record not found".to_string()));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Meal tracking
    // ------------------------------------------------------------------

    pub async fn create_meal(
        pool: &PgPool,
        user_id: Uuid,
        req: CreateMealTrackingRequest,
    ) -> Result<MealTrackingResponse, ApiError> {
        let portion = req.portion_consumed.unwrap_or(1.0);
        if !portion.is_finite() || portion <= 0.0 || portion > 10.0 {
            return Err(ApiError::Validation(
                "portion_consumed must be between 0 and 10".to_string(),
            ));
        }
        if !PlanRepository::meal_exists(pool, req.meal_id).await? {
            return Err(ApiError::NotFound("Meal not found".to_string()));
        }

        let record = TrackingRepository::create_meal(
            pool,
            CreateMealTracking {
                user_id,
                meal_id: req.meal_id,
                date_completed: req.date_completed,
                portion_consumed: portion,
                notes: req.notes.unwrap_or_default(),
            },
        )
        .await?;

        Ok(Self::meal_response(record))
    }

    pub async fn list_meal(
        pool: &PgPool,
        user_id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<Vec<MealTrackingResponse>, ApiError> {
        let records = TrackingRepository::list_meal(pool, user_id, date).await?;
        Ok(records.into_iter().map(Self::meal_response).collect())
    }

    pub async fn delete_meal(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        if !TrackingRepository::delete_meal(pool, id, user_id).await? {
            return Err(ApiError::NotFound("Tracking record not found".to_string()));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Water tracking
    // ------------------------------------------------------------------

    pub async fn create_water(
        pool: &PgPool,
        user_id: Uuid,
        req: CreateWaterTrackingRequest,
    ) -> Result<WaterTrackingResponse, ApiError> {
        validation::validate_litres(req.litres_consumed).map_err(ApiError::Validation)?;
        if !PlanRepository::nutrition_day_exists(pool, req.nutrition_day_id).await? {
            return Err(ApiError::NotFound("Nutrition day not found".to_string()));
        }

        let record = TrackingRepository::create_water(
            pool,
            CreateWaterTracking {
                user_id,
                nutrition_day_id: req.nutrition_day_id,
                date: req.date,
                litres_consumed: req.litres_consumed,
                notes: req.notes.unwrap_or_default(),
            },
        )
        .await?;

        Ok(Self::water_response(record))
    }

    pub async fn list_water(
        pool: &PgPool,
        user_id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<Vec<WaterTrackingResponse>, ApiError> {
        let records = TrackingRepository::list_water(pool, user_id, date).await?;
        Ok(records.into_iter().map(Self::water_response).collect())
    }

    pub async fn delete_water(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        if !TrackingRepository::delete_water(pool, id, user_id).await? {
            return Err(ApiError::NotFound("Tracking record not found".to_string()));
        }
        Ok(())
    }

    fn workout_response(record: WorkoutTrackingRecord) -> WorkoutTrackingResponse {
        WorkoutTrackingResponse {
            id: record.id,
            exercise_id: record.exercise_id,
            date_completed: record.date_completed,
            sets_completed: record.sets_completed,
            notes: record.notes,
            created_at: record.created_at,
        }
    }

    fn meal_response(record: MealTrackingRecord) -> MealTrackingResponse {
        MealTrackingResponse {
            id: record.id,
            meal_id: record.meal_id,
            date_completed: record.date_completed,
            portion_consumed: record.portion_consumed,
            notes: record.notes,
            created_at: record.created_at,
        }
    }

    fn water_response(record: WaterTrackingRecord) -> WaterTrackingResponse {
        WaterTrackingResponse {
            id: record.id,
            nutrition_day_id: record.nutrition_day_id,
            date: record.date,
            litres_consumed: record.litres_consumed,
            notes: record.notes,
            created_at: record.created_at,
        }
    }
}
