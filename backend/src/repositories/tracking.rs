//! Tracking repositories
//!
//! Workout, meal, and water tracking records. These are owned by the user
//! (not the plan) and reference plan sub-entities for progress computation.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Workout tracking record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkoutTrackingRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub exercise_id: Uuid,
    pub date_completed: NaiveDate,
    pub sets_completed: i32,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Meal tracking record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MealTrackingRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meal_id: Uuid,
    pub date_completed: NaiveDate,
    pub portion_consumed: f64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Water tracking record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WaterTrackingRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub nutrition_day_id: Uuid,
    pub date: NaiveDate,
    pub litres_consumed: f64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateWorkoutTracking {
    pub user_id: Uuid,
    pub exercise_id: Uuid,
    pub date_completed: NaiveDate,
    pub sets_completed: i32,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct CreateMealTracking {
    pub user_id: Uuid,
    pub meal_id: Uuid,
    pub date_completed: NaiveDate,
    pub portion_consumed: f64,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct CreateWaterTracking {
    pub user_id: Uuid,
    pub nutrition_day_id: Uuid,
    pub date: NaiveDate,
    pub litres_consumed: f64,
    pub notes: String,
}

const WORKOUT_COLUMNS: &str =
    "id, user_id, exercise_id, date_completed, sets_completed, notes, created_at";
const MEAL_COLUMNS: &str =
    "id, user_id, meal_id, date_completed, portion_consumed, notes, created_at";
const WATER_COLUMNS: &str =
    "id, user_id, nutrition_day_id, date, litres_consumed, notes, created_at";

/// Tracking repository for database operations
pub struct TrackingRepository;

impl TrackingRepository {
    // ------------------------------------------------------------------
    // Workout tracking
    // ------------------------------------------------------------------

    /// Create a workout tracking record. A duplicate (user, exercise, date)
    /// violates a unique constraint and surfaces as a conflict.
    pub async fn create_workout(
        pool: &PgPool,
        input: CreateWorkoutTracking,
    ) -> Result<WorkoutTrackingRecord, sqlx::Error> {
        sqlx::query_as::<_, WorkoutTrackingRecord>(&format!(
            r#"
            INSERT INTO workout_tracking
                (user_id, exercise_id, date_completed, sets_completed, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {WORKOUT_COLUMNS}
            "#,
        ))
        .bind(input.user_id)
        .bind(input.exercise_id)
        .bind(input.date_completed)
        .bind(input.sets_completed)
        .bind(&input.notes)
        .fetch_one(pool)
        .await
    }

    /// List a user's workout tracking, optionally filtered to one date,
    /// newest first
    pub async fn list_workout(
        pool: &PgPool,
        user_id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<Vec<WorkoutTrackingRecord>, sqlx::Error> {
        sqlx::query_as::<_, WorkoutTrackingRecord>(&format!(
            r#"
            SELECT {WORKOUT_COLUMNS} FROM workout_tracking
            WHERE user_id = $1 AND ($2::date IS NULL OR date_completed = $2)
            ORDER BY date_completed DESC, created_at DESC
            "#,
        ))
        .bind(user_id)
        .bind(date)
        .fetch_all(pool)
        .await
    }

    /// Workout tracking rows for a user within an inclusive date range
    pub async fn workout_between(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WorkoutTrackingRecord>, sqlx::Error> {
        sqlx::query_as::<_, WorkoutTrackingRecord>(&format!(
            r#"
            SELECT {WORKOUT_COLUMNS} FROM workout_tracking
            WHERE user_id = $1 AND date_completed >= $2 AND date_completed <= $3
            "#,
        ))
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }

    /// Delete a workout tracking record by id and owner
    pub async fn delete_workout(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workout_tracking WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ------------------------------------------------------------------
    // Meal tracking
    // ------------------------------------------------------------------

    pub async fn create_meal(
        pool: &PgPool,
        input: CreateMealTracking,
    ) -> Result<MealTrackingRecord, sqlx::Error> {
        sqlx::query_as::<_, MealTrackingRecord>(&format!(
            r#"
            INSERT INTO meal_tracking
                (user_id, meal_id, date_completed, portion_consumed, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {MEAL_COLUMNS}
            "#,
        ))
        .bind(input.user_id)
        .bind(input.meal_id)
        .bind(input.date_completed)
        .bind(input.portion_consumed)
        .bind(&input.notes)
        .fetch_one(pool)
        .await
    }

    pub async fn list_meal(
        pool: &PgPool,
        user_id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<Vec<MealTrackingRecord>, sqlx::Error> {
        sqlx::query_as::<_, MealTrackingRecord>(&format!(
            r#"
            SELECT {MEAL_COLUMNS} FROM meal_tracking
            WHERE user_id = $1 AND ($2::date IS NULL OR date_completed = $2)
            ORDER BY date_completed DESC, created_at DESC
            "#,
        ))
        .bind(user_id)
        .bind(date)
        .fetch_all(pool)
        .await
    }

    /// Meal tracking rows for a user within an inclusive date range
    pub async fn meal_between(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MealTrackingRecord>, sqlx::Error> {
        sqlx::query_as::<_, MealTrackingRecord>(&format!(
            r#"
            SELECT {MEAL_COLUMNS} FROM meal_tracking
            WHERE user_id = $1 AND date_completed >= $2 AND date_completed <= $3
            "#,
        ))
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }

    pub async fn delete_meal(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM meal_tracking WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ------------------------------------------------------------------
    // Water tracking
    // ------------------------------------------------------------------

    pub async fn create_water(
        pool: &PgPool,
        input: CreateWaterTracking,
    ) -> Result<WaterTrackingRecord, sqlx::Error> {
        sqlx::query_as::<_, WaterTrackingRecord>(&format!(
            r#"
            INSERT INTO water_tracking
                (user_id, nutrition_day_id, date, litres_consumed, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {WATER_COLUMNS}
            "#,
        ))
        .bind(input.user_id)
        .bind(input.nutrition_day_id)
        .bind(input.date)
        .bind(input.litres_consumed)
        .bind(&input.notes)
        .fetch_one(pool)
        .await
    }

    pub async fn list_water(
        pool: &PgPool,
        user_id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<Vec<WaterTrackingRecord>, sqlx::Error> {
        sqlx::query_as::<_, WaterTrackingRecord>(&format!(
            r#"
            SELECT {WATER_COLUMNS} FROM water_tracking
            WHERE user_id = $1 AND ($2::date IS NULL OR date = $2)
            ORDER BY date DESC, created_at DESC
            "#,
        ))
        .bind(user_id)
        .bind(date)
        .fetch_all(pool)
        .await
    }

    pub async fn delete_water(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM water_tracking WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
