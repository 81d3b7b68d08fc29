//! Daily progress calculator
//!
//! Compares planned items against tracking records for each requested date.
//! The arithmetic is a pure function over an in-memory plan tree so it can
//! be tested without a database; the service wrapper does the I/O.

use crate::error::ApiError;
use crate::repositories::{PlanRepository, ProfileRepository, TrackingRepository};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use fitness_planner_shared::types::{DailyProgress, DailyProgressResponse, ProgressQuery};
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

/// Longest date range the endpoint will compute in one request
const MAX_RANGE_DAYS: i64 = 366;

/// Workout side of one weekday, reduced to what progress needs
#[derive(Debug, Clone)]
pub struct WorkoutDayNode {
    pub day_of_week: u8,
    pub is_rest_day: bool,
    pub exercise_ids: Vec<Uuid>,
}

/// Nutrition side of one weekday
#[derive(Debug, Clone)]
pub struct NutritionDayNode {
    pub day_of_week: u8,
    pub meal_ids: Vec<Uuid>,
}

/// The active plan reduced to its per-weekday item ids
#[derive(Debug, Clone, Default)]
pub struct PlanTree {
    pub workout_days: Vec<WorkoutDayNode>,
    pub nutrition_days: Vec<NutritionDayNode>,
}

/// Progress service
pub struct ProgressService;

impl ProgressService {
    /// Compute per-day completion percentages against the user's active plan
    pub async fn daily_progress(
        pool: &PgPool,
        user_id: Uuid,
        query: ProgressQuery,
    ) -> Result<DailyProgressResponse, ApiError> {
        let dates = resolve_dates(&query, Utc::now().date_naive())?;

        let profile = ProfileRepository::find_by_user_id(pool, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

        let plan = PlanRepository::active_for_profile(pool, profile.id)
            .await?
            .ok_or_else(|| ApiError::NotFound("No active fitness plan found".to_string()))?;

        let tree = load_plan_tree(pool, plan.id).await?;

        // resolve_dates always yields at least one date
        let (first, last) = (dates[0], dates[dates.len() - 1]);
        let tracked_exercises: HashSet<(Uuid, NaiveDate)> =
            TrackingRepository::workout_between(pool, user_id, first, last)
                .await?
                .into_iter()
                .map(|r| (r.exercise_id, r.date_completed))
                .collect();
        let tracked_meals: HashSet<(Uuid, NaiveDate)> =
            TrackingRepository::meal_between(pool, user_id, first, last)
                .await?
                .into_iter()
                .map(|r| (r.meal_id, r.date_completed))
                .collect();

        let progress = compute_progress(&dates, &tree, &tracked_exercises, &tracked_meals);

        Ok(DailyProgressResponse { progress })
    }
}

/// Turn the query parameters into an ordered list of target dates.
///
/// `date` and the range parameters are mutually exclusive; a range needs
/// both bounds in order; no parameters means today.
pub fn resolve_dates(query: &ProgressQuery, today: NaiveDate) -> Result<Vec<NaiveDate>, ApiError> {
    match (query.date, query.start_date, query.end_date) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(ApiError::Validation(
            "Use either date or start_date/end_date, not both".to_string(),
        )),
        (Some(date), None, None) => Ok(vec![date]),
        (None, Some(start), Some(end)) => {
            if end < start {
                return Err(ApiError::Validation(
                    "end_date must not be before start_date".to_string(),
                ));
            }
            let span = (end - start).num_days();
            if span >= MAX_RANGE_DAYS {
                return Err(ApiError::Validation(format!(
                    "Date range too long (max {MAX_RANGE_DAYS} days)"
                )));
            }
            Ok((0..=span).map(|d| start + Duration::days(d)).collect())
        }
        (None, Some(_), None) | (None, None, Some(_)) => Err(ApiError::Validation(
            "Both start_date and end_date are required for a range".to_string(),
        )),
        (None, None, None) => Ok(vec![today]),
    }
}

/// Pure progress computation over the plan tree and tracked item sets.
///
/// Per date: a missing workout day scores 0, a rest day scores 100 whatever
/// was tracked, a day with zero exercises scores 0 (no division), otherwise
/// tracked/planned x 100. Nutrition is symmetric over meals. One decimal.
pub fn compute_progress(
    dates: &[NaiveDate],
    tree: &PlanTree,
    tracked_exercises: &HashSet<(Uuid, NaiveDate)>,
    tracked_meals: &HashSet<(Uuid, NaiveDate)>,
) -> Vec<DailyProgress> {
    dates
        .iter()
        .map(|&date| {
            let day_of_week = date.weekday().number_from_monday() as u8;

            let workout_day = tree
                .workout_days
                .iter()
                .find(|d| d.day_of_week == day_of_week);
            let (workout_progress, is_rest_day) = match workout_day {
                None => (0.0, false),
                Some(day) if day.is_rest_day => (100.0, true),
                Some(day) => (
                    completion_percent(&day.exercise_ids, date, tracked_exercises),
                    false,
                ),
            };

            let nutrition_progress = tree
                .nutrition_days
                .iter()
                .find(|d| d.day_of_week == day_of_week)
                .map(|day| completion_percent(&day.meal_ids, date, tracked_meals))
                .unwrap_or(0.0);

            DailyProgress {
                date,
                day_of_week,
                workout_progress: round1(workout_progress),
                nutrition_progress: round1(nutrition_progress),
                is_rest_day,
            }
        })
        .collect()
}

fn completion_percent(
    planned: &[Uuid],
    date: NaiveDate,
    tracked: &HashSet<(Uuid, NaiveDate)>,
) -> f64 {
    if planned.is_empty() {
        return 0.0;
    }
    let completed = planned
        .iter()
        .filter(|id| tracked.contains(&(**id, date)))
        .count();
    completed as f64 / planned.len() as f64 * 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

async fn load_plan_tree(pool: &PgPool, plan_id: Uuid) -> Result<PlanTree, ApiError> {
    let workout_days = PlanRepository::workout_days(pool, plan_id).await?;
    let exercises = PlanRepository::exercises_for_plan(pool, plan_id).await?;
    let nutrition_days = PlanRepository::nutrition_days(pool, plan_id).await?;
    let meals = PlanRepository::meals_for_plan(pool, plan_id).await?;

    Ok(PlanTree {
        workout_days: workout_days
            .into_iter()
            .map(|day| WorkoutDayNode {
                day_of_week: day.day_of_week as u8,
                is_rest_day: day.is_rest_day,
                exercise_ids: exercises
                    .iter()
                    .filter(|e| e.workout_day_id == day.id)
                    .map(|e| e.id)
                    .collect(),
            })
            .collect(),
        nutrition_days: nutrition_days
            .into_iter()
            .map(|day| NutritionDayNode {
                day_of_week: day.day_of_week as u8,
                meal_ids: meals
                    .iter()
                    .filter(|m| m.nutrition_day_id == day.id)
                    .map(|m| m.id)
                    .collect(),
            })
            .collect(),
    })
}
