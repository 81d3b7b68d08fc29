//! Plan-generation payload schema
//!
//! The external generator (or the static fallback) produces exactly this
//! structure: one workout day and one nutrition day per weekday, Monday=1
//! through Sunday=7. [`GeneratedPlan::validate`] is the single gate every
//! payload passes before persistence, so downstream code never needs to
//! re-check shape invariants.

use crate::models::MealType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Days in a plan week; both day lists must have exactly this many entries.
pub const DAYS_PER_WEEK: usize = 7;

/// Violations of the generation payload shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanValidationError {
    #[error("expected {DAYS_PER_WEEK} {tree} days, got {actual}")]
    WrongDayCount { tree: &'static str, actual: usize },

    #[error("{tree} day_of_week {day} out of range 1..=7")]
    DayOutOfRange { tree: &'static str, day: u8 },

    #[error("duplicate {tree} day_of_week {day}")]
    DuplicateDay { tree: &'static str, day: u8 },

    #[error("workout day {day}: exercise '{name}' must have at least one set")]
    InvalidSets { day: u8, name: String },

    #[error("nutrition day {day} has no meals")]
    EmptyMeals { day: u8 },

    #[error("{field} must be non-negative on day {day}")]
    NegativeValue { field: &'static str, day: u8 },
}

/// A single exercise prescription within a workout day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePlan {
    pub name: String,
    pub sets: i32,
    /// Free-form: "10-12", "AMRAP", "30 seconds"
    pub reps: String,
    pub rest_period_seconds: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One weekday of workouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDayPlan {
    /// 1 = Monday .. 7 = Sunday
    pub day_of_week: u8,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_rest_day: bool,
    #[serde(default)]
    pub exercises: Vec<ExercisePlan>,
}

/// A single meal within a nutrition day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub meal_type: MealType,
    pub description: String,
    pub calories: i32,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fats_grams: f64,
    #[serde(default)]
    pub portion_size: Option<String>,
}

/// One weekday of nutrition targets and meals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionDayPlan {
    /// 1 = Monday .. 7 = Sunday
    pub day_of_week: u8,
    #[serde(default)]
    pub target_calories: Option<i32>,
    #[serde(default)]
    pub target_protein_grams: Option<i32>,
    #[serde(default)]
    pub target_carbs_grams: Option<i32>,
    #[serde(default)]
    pub target_fats_grams: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
    pub meals: Vec<MealPlan>,
}

/// The complete payload the generator contract promises
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub workout_days: Vec<WorkoutDayPlan>,
    pub nutrition_days: Vec<NutritionDayPlan>,
}

impl GeneratedPlan {
    /// Enforce the payload shape: exactly seven workout and nutrition days,
    /// weekdays forming the set {1..7} once each in both trees, positive
    /// sets, at least one meal per nutrition day, and no negative numbers.
    pub fn validate(&self) -> Result<(), PlanValidationError> {
        check_week_coverage("workout", self.workout_days.iter().map(|d| d.day_of_week))?;
        check_week_coverage("nutrition", self.nutrition_days.iter().map(|d| d.day_of_week))?;

        for day in &self.workout_days {
            for exercise in &day.exercises {
                if exercise.sets <= 0 {
                    return Err(PlanValidationError::InvalidSets {
                        day: day.day_of_week,
                        name: exercise.name.clone(),
                    });
                }
                if exercise.rest_period_seconds < 0 {
                    return Err(PlanValidationError::NegativeValue {
                        field: "rest_period_seconds",
                        day: day.day_of_week,
                    });
                }
            }
        }

        for day in &self.nutrition_days {
            if day.meals.is_empty() {
                return Err(PlanValidationError::EmptyMeals {
                    day: day.day_of_week,
                });
            }
            for target in [
                day.target_calories,
                day.target_protein_grams,
                day.target_carbs_grams,
                day.target_fats_grams,
            ]
            .into_iter()
            .flatten()
            {
                if target < 0 {
                    return Err(PlanValidationError::NegativeValue {
                        field: "nutrition target",
                        day: day.day_of_week,
                    });
                }
            }
            for meal in &day.meals {
                if meal.calories < 0 {
                    return Err(PlanValidationError::NegativeValue {
                        field: "calories",
                        day: day.day_of_week,
                    });
                }
                for grams in [meal.protein_grams, meal.carbs_grams, meal.fats_grams] {
                    if !grams.is_finite() || grams < 0.0 {
                        return Err(PlanValidationError::NegativeValue {
                            field: "macro grams",
                            day: day.day_of_week,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Weekdays must be exactly {1..7}, each appearing once.
fn check_week_coverage(
    tree: &'static str,
    days: impl Iterator<Item = u8>,
) -> Result<(), PlanValidationError> {
    let mut seen = [false; DAYS_PER_WEEK];
    let mut count = 0usize;

    for day in days {
        if !(1..=7).contains(&day) {
            return Err(PlanValidationError::DayOutOfRange { tree, day });
        }
        let slot = (day - 1) as usize;
        if seen[slot] {
            return Err(PlanValidationError::DuplicateDay { tree, day });
        }
        seen[slot] = true;
        count += 1;
    }

    if count != DAYS_PER_WEEK {
        return Err(PlanValidationError::WrongDayCount {
            tree,
            actual: count,
        });
    }

    Ok(())
}
