//! API request and response types
//!
//! Every endpoint takes a typed request struct and returns a typed response
//! struct; nested plan aggregates are composed by hand rather than derived
//! from storage rows.

use crate::models::{ActivityLevel, FitnessGoal, Gender, MealType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Auth and user types
// ============================================================================

/// Signup request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Authentication tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Tokens plus the user they belong to, returned by signup and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    #[serde(flatten)]
    pub tokens: AuthTokens,
}

/// User representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Update for the authenticated user; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

// ============================================================================
// Profile types
// ============================================================================

/// Profile create/replace payload; every attribute is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub current_weight_kg: Option<f64>,
    #[serde(default)]
    pub height_cm: Option<i32>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub goal: Option<FitnessGoal>,
    #[serde(default)]
    pub dietary_preferences: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Profile representation with the derived BMI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub current_weight_kg: Option<f64>,
    pub height_cm: Option<i32>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<FitnessGoal>,
    pub dietary_preferences: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// weight_kg / height_m^2, rounded to 2 decimals; null if inputs missing
    pub bmi: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Plan types
// ============================================================================

/// Plan creation request with an explicit inclusive date range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlanRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A fitness plan with its full workout and nutrition subtree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessPlanResponse {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub goal_at_creation: Option<FitnessGoal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub workout_days: Vec<WorkoutDayResponse>,
    pub nutrition_days: Vec<NutritionDayResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutDayResponse {
    pub id: Uuid,
    pub day_of_week: i16,
    pub title: String,
    pub description: String,
    pub is_rest_day: bool,
    pub exercises: Vec<ExerciseResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseResponse {
    pub id: Uuid,
    pub name: String,
    pub sets: i32,
    pub reps: String,
    pub rest_period_seconds: i32,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionDayResponse {
    pub id: Uuid,
    pub day_of_week: i16,
    pub target_calories: Option<i32>,
    pub target_protein_grams: Option<i32>,
    pub target_carbs_grams: Option<i32>,
    pub target_fats_grams: Option<i32>,
    pub notes: String,
    pub meals: Vec<MealResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealResponse {
    pub id: Uuid,
    pub meal_type: MealType,
    pub description: String,
    pub calories: i32,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fats_grams: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portion_size: Option<String>,
}

/// Envelope for a freshly generated plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanCreatedResponse {
    pub message: String,
    pub plan: FitnessPlanResponse,
}

// ============================================================================
// Tracking types
// ============================================================================

/// Date filter for tracking list endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackingQuery {
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkoutTrackingRequest {
    pub exercise_id: Uuid,
    pub date_completed: NaiveDate,
    pub sets_completed: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutTrackingResponse {
    pub id: Uuid,
    pub exercise_id: Uuid,
    pub date_completed: NaiveDate,
    pub sets_completed: i32,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMealTrackingRequest {
    pub meal_id: Uuid,
    pub date_completed: NaiveDate,
    /// Fraction of the planned portion eaten; defaults to a full portion
    #[serde(default)]
    pub portion_consumed: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealTrackingResponse {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub date_completed: NaiveDate,
    pub portion_consumed: f64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWaterTrackingRequest {
    pub nutrition_day_id: Uuid,
    pub date: NaiveDate,
    pub litres_consumed: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterTrackingResponse {
    pub id: Uuid,
    pub nutrition_day_id: Uuid,
    pub date: NaiveDate,
    pub litres_consumed: f64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Progress types
// ============================================================================

/// Query parameters for the daily-progress endpoint: either `date` or
/// `start_date` + `end_date`, or nothing for today
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressQuery {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Completion percentages for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub date: NaiveDate,
    /// ISO weekday, 1 = Monday .. 7 = Sunday
    pub day_of_week: u8,
    pub workout_progress: f64,
    pub nutrition_progress: f64,
    pub is_rest_day: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyProgressResponse {
    pub progress: Vec<DailyProgress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_flattens_tokens() {
        let response = AuthResponse {
            user: UserResponse {
                id: Uuid::nil(),
                username: "ama".to_string(),
                email: "ama@example.com".to_string(),
                first_name: None,
                last_name: None,
                created_at: DateTime::<Utc>::MIN_UTC,
            },
            tokens: AuthTokens {
                access_token: "a".to_string(),
                refresh_token: "r".to_string(),
                token_type: "Bearer".to_string(),
                expires_in: 3600,
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["access_token"], "a");
        assert_eq!(json["user"]["username"], "ama");
    }

    #[test]
    fn profile_input_defaults_to_empty() {
        let input: ProfileInput = serde_json::from_str("{}").unwrap();
        assert!(input.current_weight_kg.is_none());
        assert!(input.goal.is_none());
    }

    #[test]
    fn progress_query_accepts_partial_params() {
        let query: ProgressQuery =
            serde_json::from_str(r#"{"date": "2024-03-04"}"#).unwrap();
        assert_eq!(
            query.date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
        );
        assert!(query.start_date.is_none());
    }
}
