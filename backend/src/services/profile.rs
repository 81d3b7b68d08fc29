//! Profile service
//!
//! One profile per user: create conflicts when one exists, reads and updates
//! are not-found without one. Responses carry the derived BMI.

use crate::error::ApiError;
use crate::repositories::{ProfileRecord, ProfileRepository, UserRepository, WriteProfile};
use fitness_planner_shared::health_metrics::calculate_bmi;
use fitness_planner_shared::models::ProfileSnapshot;
use fitness_planner_shared::types::{ProfileInput, ProfileResponse};
use fitness_planner_shared::validation;
use rust_decimal::prelude::ToPrimitive;
use sqlx::PgPool;
use uuid::Uuid;

/// Profile service
pub struct ProfileService;

impl ProfileService {
    /// Create the profile for a user; conflicts if one already exists
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        input: ProfileInput,
    ) -> Result<ProfileResponse, ApiError> {
        Self::validate_input(&input)?;

        if ProfileRepository::find_by_user_id(pool, user_id)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(
                "Profile already exists. Use PUT or PATCH to update.".to_string(),
            ));
        }

        let record = ProfileRepository::create(pool, user_id, Self::to_write(input)).await?;
        Self::response(pool, record).await
    }

    /// The user's profile, or not-found
    pub async fn get(pool: &PgPool, user_id: Uuid) -> Result<ProfileResponse, ApiError> {
        let record = ProfileRepository::find_by_user_id(pool, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

        Self::response(pool, record).await
    }

    /// Update the profile. `partial` selects PATCH (merge) versus PUT
    /// (full replace) semantics.
    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        input: ProfileInput,
        partial: bool,
    ) -> Result<ProfileResponse, ApiError> {
        Self::validate_input(&input)?;

        let dietary = input.dietary_preferences.clone();
        let write = Self::to_write(input);

        let record = if partial {
            ProfileRepository::update_partial(pool, user_id, write, dietary).await?
        } else {
            ProfileRepository::replace(pool, user_id, write).await?
        };

        let record = record.ok_or_else(|| {
            ApiError::NotFound("Profile not found. Please create one first.".to_string())
        })?;

        Self::response(pool, record).await
    }

    /// Snapshot of the attributes the plan generator personalizes on
    pub fn snapshot(record: &ProfileRecord) -> ProfileSnapshot {
        ProfileSnapshot {
            current_weight_kg: record.current_weight_kg.and_then(|w| w.to_f64()),
            height_cm: record.height_cm,
            age: record.age,
            gender: record.gender.as_deref().and_then(|s| s.parse().ok()),
            activity_level: record.activity_level.as_deref().and_then(|s| s.parse().ok()),
            goal: record.goal.as_deref().and_then(|s| s.parse().ok()),
            dietary_preferences: record.dietary_preferences.clone(),
        }
    }

    fn validate_input(input: &ProfileInput) -> Result<(), ApiError> {
        if let Some(weight) = input.current_weight_kg {
            validation::validate_weight_kg(weight).map_err(ApiError::Validation)?;
        }
        if let Some(height) = input.height_cm {
            validation::validate_height_cm(height).map_err(ApiError::Validation)?;
        }
        if let Some(age) = input.age {
            validation::validate_age(age).map_err(ApiError::Validation)?;
        }
        Ok(())
    }

    fn to_write(input: ProfileInput) -> WriteProfile {
        WriteProfile {
            current_weight_kg: input.current_weight_kg,
            height_cm: input.height_cm,
            age: input.age,
            gender: input.gender.map(|g| g.as_str().to_string()),
            activity_level: input.activity_level.map(|a| a.as_str().to_string()),
            goal: input.goal.map(|g| g.as_str().to_string()),
            dietary_preferences: input.dietary_preferences.unwrap_or_default(),
            image: input.image,
        }
    }

    async fn response(pool: &PgPool, record: ProfileRecord) -> Result<ProfileResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, record.user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let weight = record.current_weight_kg.and_then(|w| w.to_f64());

        Ok(ProfileResponse {
            id: record.id,
            username: user.username,
            current_weight_kg: weight,
            height_cm: record.height_cm,
            age: record.age,
            gender: record.gender.as_deref().and_then(|s| s.parse().ok()),
            activity_level: record.activity_level.as_deref().and_then(|s| s.parse().ok()),
            goal: record.goal.as_deref().and_then(|s| s.parse().ok()),
            dietary_preferences: record.dietary_preferences,
            image: record.image,
            bmi: calculate_bmi(weight, record.height_cm.map(f64::from)),
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}
