//! Plan service
//!
//! Orchestrates plan creation: validate the range, check overlap, run the
//! generator (with fallback), and persist the whole aggregate atomically.

use crate::config::AiConfig;
use crate::error::ApiError;
use crate::generator::{self, PlanGenerator};
use crate::repositories::{
    CreatePlan, PlanRecord, PlanRepository, ProfileRepository,
};
use crate::services::ProfileService;
use fitness_planner_shared::types::{
    CreatePlanRequest, ExerciseResponse, FitnessPlanResponse, MealResponse, NutritionDayResponse,
    WorkoutDayResponse,
};
use fitness_planner_shared::validation;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Plan service
pub struct PlanService;

impl PlanService {
    /// Generate and persist a plan for an explicit inclusive date range.
    ///
    /// Fails with Validation on a bad range, NotFound without a profile, and
    /// Conflict when the range overlaps an existing plan. Generation itself
    /// never fails the request: the fallback payload stands in.
    pub async fn create_plan(
        pool: &PgPool,
        plan_generator: &dyn PlanGenerator,
        ai: &AiConfig,
        user_id: Uuid,
        req: CreatePlanRequest,
    ) -> Result<FitnessPlanResponse, ApiError> {
        validation::validate_date_range(req.start_date, req.end_date)
            .map_err(ApiError::Validation)?;

        let profile = ProfileRepository::find_by_user_id(pool, user_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound("Profile not found. Please create a profile first.".to_string())
            })?;

        if PlanRepository::has_overlap(pool, profile.id, req.start_date, req.end_date).await? {
            return Err(ApiError::Conflict(
                "A plan already exists for the selected date range".to_string(),
            ));
        }

        let snapshot = ProfileService::snapshot(&profile);
        let outcome = generator::generate_or_fallback(
            plan_generator,
            ai,
            &snapshot,
            req.start_date,
            req.end_date,
        )
        .await;

        info!(
            profile_id = %profile.id,
            source = ?outcome.source,
            "persisting generated plan"
        );

        let plan = PlanRepository::create_with_payload(
            pool,
            CreatePlan {
                profile_id: profile.id,
                start_date: req.start_date,
                end_date: req.end_date,
                goal_at_creation: profile.goal.clone(),
                ai_prompt_text: outcome.prompt,
                ai_response_raw: outcome.raw_response,
            },
            &outcome.plan,
        )
        .await?;

        Self::plan_response(pool, plan).await
    }

    /// All plans of the user's profile, newest range first, as full aggregates
    pub async fn list_plans(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<FitnessPlanResponse>, ApiError> {
        let profile = ProfileRepository::find_by_user_id(pool, user_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound("Profile not found. Please create a profile first.".to_string())
            })?;

        let records = PlanRepository::list_for_profile(pool, profile.id).await?;

        let mut plans = Vec::with_capacity(records.len());
        for record in records {
            plans.push(Self::plan_response(pool, record).await?);
        }
        Ok(plans)
    }

    /// Delete a plan owned by the user; not-found covers both a missing id
    /// and someone else's plan
    pub async fn delete_plan(pool: &PgPool, user_id: Uuid, plan_id: Uuid) -> Result<(), ApiError> {
        if !PlanRepository::delete_for_user(pool, plan_id, user_id).await? {
            return Err(ApiError::NotFound("Plan not found".to_string()));
        }
        Ok(())
    }

    /// Compose the full aggregate response for a plan row
    pub(crate) async fn plan_response(
        pool: &PgPool,
        plan: PlanRecord,
    ) -> Result<FitnessPlanResponse, ApiError> {
        let workout_days = PlanRepository::workout_days(pool, plan.id).await?;
        let exercises = PlanRepository::exercises_for_plan(pool, plan.id).await?;
        let nutrition_days = PlanRepository::nutrition_days(pool, plan.id).await?;
        let meals = PlanRepository::meals_for_plan(pool, plan.id).await?;

        let workout_days = workout_days
            .into_iter()
            .map(|day| WorkoutDayResponse {
                exercises: exercises
                    .iter()
                    .filter(|e| e.workout_day_id == day.id)
                    .map(|e| ExerciseResponse {
                        id: e.id,
                        name: e.name.clone(),
                        sets: e.sets,
                        reps: e.reps.clone(),
                        rest_period_seconds: e.rest_period_seconds,
                        notes: e.notes.clone(),
                    })
                    .collect(),
                id: day.id,
                day_of_week: day.day_of_week,
                title: day.title,
                description: day.description,
                is_rest_day: day.is_rest_day,
            })
            .collect();

        let nutrition_days = nutrition_days
            .into_iter()
            .map(|day| NutritionDayResponse {
                meals: meals
                    .iter()
                    .filter(|m| m.nutrition_day_id == day.id)
                    .map(|m| MealResponse {
                        id: m.id,
                        meal_type: m.meal_type.parse().unwrap_or(
                            fitness_planner_shared::models::MealType::Snack,
                        ),
                        description: m.description.clone(),
                        calories: m.calories,
                        protein_grams: m.protein_grams,
                        carbs_grams: m.carbs_grams,
                        fats_grams: m.fats_grams,
                        portion_size: m.portion_size.clone(),
                    })
                    .collect(),
                id: day.id,
                day_of_week: day.day_of_week,
                target_calories: day.target_calories,
                target_protein_grams: day.target_protein_grams,
                target_carbs_grams: day.target_carbs_grams,
                target_fats_grams: day.target_fats_grams,
                notes: day.notes,
            })
            .collect();

        Ok(FitnessPlanResponse {
            id: plan.id,
            profile_id: plan.profile_id,
            start_date: plan.start_date,
            end_date: plan.end_date,
            goal_at_creation: plan.goal_at_creation.as_deref().and_then(|s| s.parse().ok()),
            is_active: plan.is_active,
            created_at: plan.created_at,
            workout_days,
            nutrition_days,
        })
    }
}
