//! Profile repository for database operations
//!
//! One profile per user, enforced by a unique constraint on `user_id`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Profile record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub current_weight_kg: Option<Decimal>,
    pub height_cm: Option<i32>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
    pub dietary_preferences: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full set of writable profile attributes, used for both insert and replace
#[derive(Debug, Clone, Default)]
pub struct WriteProfile {
    pub current_weight_kg: Option<f64>,
    pub height_cm: Option<i32>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
    pub dietary_preferences: String,
    pub image: Option<String>,
}

const PROFILE_COLUMNS: &str = "id, user_id, current_weight_kg, height_cm, age, gender, \
     activity_level, goal, dietary_preferences, image, created_at, updated_at";

/// Profile repository for database operations
pub struct ProfileRepository;

impl ProfileRepository {
    /// Create the profile for a user
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        input: WriteProfile,
    ) -> Result<ProfileRecord, sqlx::Error> {
        sqlx::query_as::<_, ProfileRecord>(&format!(
            r#"
            INSERT INTO profiles
                (user_id, current_weight_kg, height_cm, age, gender,
                 activity_level, goal, dietary_preferences, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PROFILE_COLUMNS}
            "#,
        ))
        .bind(user_id)
        .bind(input.current_weight_kg)
        .bind(input.height_cm)
        .bind(input.age)
        .bind(&input.gender)
        .bind(&input.activity_level)
        .bind(&input.goal)
        .bind(&input.dietary_preferences)
        .bind(&input.image)
        .fetch_one(pool)
        .await
    }

    /// Get the profile belonging to a user
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<ProfileRecord>, sqlx::Error> {
        sqlx::query_as::<_, ProfileRecord>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1",
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Replace every writable attribute (PUT semantics; absent values clear)
    pub async fn replace(
        pool: &PgPool,
        user_id: Uuid,
        input: WriteProfile,
    ) -> Result<Option<ProfileRecord>, sqlx::Error> {
        sqlx::query_as::<_, ProfileRecord>(&format!(
            r#"
            UPDATE profiles SET
                current_weight_kg = $2,
                height_cm = $3,
                age = $4,
                gender = $5,
                activity_level = $6,
                goal = $7,
                dietary_preferences = $8,
                image = $9,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {PROFILE_COLUMNS}
            "#,
        ))
        .bind(user_id)
        .bind(input.current_weight_kg)
        .bind(input.height_cm)
        .bind(input.age)
        .bind(&input.gender)
        .bind(&input.activity_level)
        .bind(&input.goal)
        .bind(&input.dietary_preferences)
        .bind(&input.image)
        .fetch_optional(pool)
        .await
    }

    /// Merge provided attributes into the profile (PATCH semantics; `None`
    /// fields are left unchanged)
    pub async fn update_partial(
        pool: &PgPool,
        user_id: Uuid,
        input: WriteProfile,
        dietary_preferences: Option<String>,
    ) -> Result<Option<ProfileRecord>, sqlx::Error> {
        sqlx::query_as::<_, ProfileRecord>(&format!(
            r#"
            UPDATE profiles SET
                current_weight_kg = COALESCE($2, current_weight_kg),
                height_cm = COALESCE($3, height_cm),
                age = COALESCE($4, age),
                gender = COALESCE($5, gender),
                activity_level = COALESCE($6, activity_level),
                goal = COALESCE($7, goal),
                dietary_preferences = COALESCE($8, dietary_preferences),
                image = COALESCE($9, image),
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {PROFILE_COLUMNS}
            "#,
        ))
        .bind(user_id)
        .bind(input.current_weight_kg)
        .bind(input.height_cm)
        .bind(input.age)
        .bind(&input.gender)
        .bind(&input.activity_level)
        .bind(&input.goal)
        .bind(&dietary_preferences)
        .bind(&input.image)
        .fetch_optional(pool)
        .await
    }
}
