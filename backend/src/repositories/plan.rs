//! Fitness plan repository
//!
//! Owns the plan aggregate: the plan row plus its workout/nutrition subtree.
//! The whole subtree is written in one transaction; a failure at any nested
//! insert rolls everything back, so a plan is never left partially created.

use chrono::{DateTime, NaiveDate, Utc};
use fitness_planner_shared::plan::GeneratedPlan;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Fitness plan row (audit columns not selected)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlanRecord {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub goal_at_creation: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkoutDayRecord {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub day_of_week: i16,
    pub title: String,
    pub description: String,
    pub is_rest_day: bool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExerciseRecord {
    pub id: Uuid,
    pub workout_day_id: Uuid,
    pub name: String,
    pub sets: i32,
    pub reps: String,
    pub rest_period_seconds: i32,
    pub notes: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NutritionDayRecord {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub day_of_week: i16,
    pub target_calories: Option<i32>,
    pub target_protein_grams: Option<i32>,
    pub target_carbs_grams: Option<i32>,
    pub target_fats_grams: Option<i32>,
    pub notes: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MealRecord {
    pub id: Uuid,
    pub nutrition_day_id: Uuid,
    pub meal_type: String,
    pub description: String,
    pub calories: i32,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fats_grams: f64,
    pub portion_size: Option<String>,
}

/// Input for creating a plan row
#[derive(Debug, Clone)]
pub struct CreatePlan {
    pub profile_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub goal_at_creation: Option<String>,
    pub ai_prompt_text: String,
    pub ai_response_raw: Option<serde_json::Value>,
}

const PLAN_COLUMNS: &str =
    "id, profile_id, start_date, end_date, goal_at_creation, is_active, created_at";

/// Plan repository for database operations
pub struct PlanRepository;

impl PlanRepository {
    /// Check whether any existing plan of this profile overlaps the given
    /// inclusive range: `existing.start <= new.end AND existing.end >= new.start`
    pub async fn has_overlap(
        pool: &PgPool,
        profile_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM fitness_plans
                WHERE profile_id = $1 AND start_date <= $3 AND end_date >= $2
            )
            "#,
        )
        .bind(profile_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(pool)
        .await
    }

    /// Persist a plan row and its full generated subtree in one transaction.
    ///
    /// The exclusion constraint on `fitness_plans` serializes overlapping
    /// concurrent inserts; a violation surfaces as a database error with
    /// SQLSTATE 23P01, which the error layer maps to a conflict.
    pub async fn create_with_payload(
        pool: &PgPool,
        input: CreatePlan,
        payload: &GeneratedPlan,
    ) -> Result<PlanRecord, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let plan = sqlx::query_as::<_, PlanRecord>(&format!(
            r#"
            INSERT INTO fitness_plans
                (profile_id, start_date, end_date, goal_at_creation,
                 ai_prompt_text, ai_response_raw)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PLAN_COLUMNS}
            "#,
        ))
        .bind(input.profile_id)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.goal_at_creation)
        .bind(&input.ai_prompt_text)
        .bind(&input.ai_response_raw)
        .fetch_one(&mut *tx)
        .await?;

        for day in &payload.workout_days {
            let day_id = Self::insert_workout_day(&mut tx, plan.id, day).await?;
            for (position, exercise) in day.exercises.iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO exercises
                        (workout_day_id, position, name, sets, reps, rest_period_seconds, notes)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(day_id)
                .bind(position as i16)
                .bind(&exercise.name)
                .bind(exercise.sets)
                .bind(&exercise.reps)
                .bind(exercise.rest_period_seconds)
                .bind(exercise.notes.as_deref().unwrap_or(""))
                .execute(&mut *tx)
                .await?;
            }
        }

        for day in &payload.nutrition_days {
            let day_id = Self::insert_nutrition_day(&mut tx, plan.id, day).await?;
            for (position, meal) in day.meals.iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO meals
                        (nutrition_day_id, position, meal_type, description, calories,
                         protein_grams, carbs_grams, fats_grams, portion_size)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                    "#,
                )
                .bind(day_id)
                .bind(position as i16)
                .bind(meal.meal_type.as_str())
                .bind(&meal.description)
                .bind(meal.calories)
                .bind(meal.protein_grams)
                .bind(meal.carbs_grams)
                .bind(meal.fats_grams)
                .bind(&meal.portion_size)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(plan)
    }

    async fn insert_workout_day(
        tx: &mut Transaction<'_, Postgres>,
        plan_id: Uuid,
        day: &fitness_planner_shared::plan::WorkoutDayPlan,
    ) -> Result<Uuid, sqlx::Error> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO workout_days (plan_id, day_of_week, title, description, is_rest_day)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(plan_id)
        .bind(day.day_of_week as i16)
        .bind(&day.title)
        .bind(day.description.as_deref().unwrap_or(""))
        .bind(day.is_rest_day)
        .fetch_one(&mut **tx)
        .await
    }

    async fn insert_nutrition_day(
        tx: &mut Transaction<'_, Postgres>,
        plan_id: Uuid,
        day: &fitness_planner_shared::plan::NutritionDayPlan,
    ) -> Result<Uuid, sqlx::Error> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO nutrition_days
                (plan_id, day_of_week, target_calories, target_protein_grams,
                 target_carbs_grams, target_fats_grams, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(plan_id)
        .bind(day.day_of_week as i16)
        .bind(day.target_calories)
        .bind(day.target_protein_grams)
        .bind(day.target_carbs_grams)
        .bind(day.target_fats_grams)
        .bind(day.notes.as_deref().unwrap_or(""))
        .fetch_one(&mut **tx)
        .await
    }

    /// List a profile's plans, newest range first
    pub async fn list_for_profile(
        pool: &PgPool,
        profile_id: Uuid,
    ) -> Result<Vec<PlanRecord>, sqlx::Error> {
        sqlx::query_as::<_, PlanRecord>(&format!(
            r#"
            SELECT {PLAN_COLUMNS} FROM fitness_plans
            WHERE profile_id = $1
            ORDER BY start_date DESC
            "#,
        ))
        .bind(profile_id)
        .fetch_all(pool)
        .await
    }

    /// The profile's current active plan, most recently created first
    pub async fn active_for_profile(
        pool: &PgPool,
        profile_id: Uuid,
    ) -> Result<Option<PlanRecord>, sqlx::Error> {
        sqlx::query_as::<_, PlanRecord>(&format!(
            r#"
            SELECT {PLAN_COLUMNS} FROM fitness_plans
            WHERE profile_id = $1 AND is_active = TRUE
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        ))
        .bind(profile_id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a plan owned by the given user; cascades through the subtree.
    /// Returns false when no such plan belongs to the user.
    pub async fn delete_for_user(
        pool: &PgPool,
        plan_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM fitness_plans
            WHERE id = $1
              AND profile_id IN (SELECT id FROM profiles WHERE user_id = $2)
            "#,
        )
        .bind(plan_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Workout days of a plan, ordered by weekday
    pub async fn workout_days(
        pool: &PgPool,
        plan_id: Uuid,
    ) -> Result<Vec<WorkoutDayRecord>, sqlx::Error> {
        sqlx::query_as::<_, WorkoutDayRecord>(
            r#"
            SELECT id, plan_id, day_of_week, title, description, is_rest_day
            FROM workout_days
            WHERE plan_id = $1
            ORDER BY day_of_week
            "#,
        )
        .bind(plan_id)
        .fetch_all(pool)
        .await
    }

    /// All exercises of a plan, ordered by weekday then insertion
    pub async fn exercises_for_plan(
        pool: &PgPool,
        plan_id: Uuid,
    ) -> Result<Vec<ExerciseRecord>, sqlx::Error> {
        sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT e.id, e.workout_day_id, e.name, e.sets, e.reps,
                   e.rest_period_seconds, e.notes
            FROM exercises e
            JOIN workout_days w ON w.id = e.workout_day_id
            WHERE w.plan_id = $1
            ORDER BY w.day_of_week, e.position
            "#,
        )
        .bind(plan_id)
        .fetch_all(pool)
        .await
    }

    /// Nutrition days of a plan, ordered by weekday
    pub async fn nutrition_days(
        pool: &PgPool,
        plan_id: Uuid,
    ) -> Result<Vec<NutritionDayRecord>, sqlx::Error> {
        sqlx::query_as::<_, NutritionDayRecord>(
            r#"
            SELECT id, plan_id, day_of_week, target_calories, target_protein_grams,
                   target_carbs_grams, target_fats_grams, notes
            FROM nutrition_days
            WHERE plan_id = $1
            ORDER BY day_of_week
            "#,
        )
        .bind(plan_id)
        .fetch_all(pool)
        .await
    }

    /// All meals of a plan, ordered by weekday then insertion
    pub async fn meals_for_plan(
        pool: &PgPool,
        plan_id: Uuid,
    ) -> Result<Vec<MealRecord>, sqlx::Error> {
        sqlx::query_as::<_, MealRecord>(
            r#"
            SELECT m.id, m.nutrition_day_id, m.meal_type, m.description, m.calories,
                   m.protein_grams, m.carbs_grams, m.fats_grams, m.portion_size
            FROM meals m
            JOIN nutrition_days n ON n.id = m.nutrition_day_id
            WHERE n.plan_id = $1
            ORDER BY n.day_of_week, m.position
            "#,
        )
        .bind(plan_id)
        .fetch_all(pool)
        .await
    }

    /// Does this exercise exist at all (used before accepting tracking rows)
    pub async fn exercise_exists(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM exercises WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Does this meal exist at all
    pub async fn meal_exists(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM meals WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Does this nutrition day exist at all
    pub async fn nutrition_day_exists(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM nutrition_days WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
