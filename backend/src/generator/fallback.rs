//! Deterministic fallback plan
//!
//! A fixed, schema-valid week of generic workouts and meals, substituted
//! whenever the external generator fails. It satisfies the same shape
//! invariants as model output (7 workout days, 7 nutrition days, weekdays
//! 1..=7 once each) so persistence and progress need no special cases.

use fitness_planner_shared::models::MealType;
use fitness_planner_shared::plan::{
    ExercisePlan, GeneratedPlan, MealPlan, NutritionDayPlan, WorkoutDayPlan,
};
use once_cell::sync::Lazy;

static FALLBACK_PLAN: Lazy<GeneratedPlan> = Lazy::new(build_fallback_plan);

/// The static fallback payload. Cloned per call; identical every time.
pub fn fallback_plan() -> GeneratedPlan {
    FALLBACK_PLAN.clone()
}

fn exercise(name: &str, sets: i32, reps: &str, rest_secs: i32) -> ExercisePlan {
    ExercisePlan {
        name: name.to_string(),
        sets,
        reps: reps.to_string(),
        rest_period_seconds: rest_secs,
        notes: None,
    }
}

fn workout_day(
    day_of_week: u8,
    title: &str,
    description: &str,
    exercises: Vec<ExercisePlan>,
) -> WorkoutDayPlan {
    WorkoutDayPlan {
        day_of_week,
        title: title.to_string(),
        description: Some(description.to_string()),
        is_rest_day: false,
        exercises,
    }
}

fn meal(meal_type: MealType, description: &str, calories: i32, protein: f64, carbs: f64, fats: f64, portion: &str) -> MealPlan {
    MealPlan {
        meal_type,
        description: description.to_string(),
        calories,
        protein_grams: protein,
        carbs_grams: carbs,
        fats_grams: fats,
        portion_size: Some(portion.to_string()),
    }
}

fn build_fallback_plan() -> GeneratedPlan {
    let workout_days = vec![
        workout_day(
            1,
            "Full Body Strength",
            "Bodyweight basics, controlled tempo.",
            vec![
                exercise("Push-ups", 3, "10-12", 60),
                exercise("Bodyweight Squats", 3, "15", 60),
                exercise("Plank", 3, "30 seconds", 45),
            ],
        ),
        workout_day(
            2,
            "Cardio & Core",
            "Keep the walk brisk enough to raise your heart rate.",
            vec![
                exercise("Brisk Walking", 1, "30 minutes", 0),
                exercise("Crunches", 3, "15", 45),
                exercise("Glute Bridges", 3, "12", 45),
            ],
        ),
        workout_day(
            3,
            "Upper Body",
            "Use a sturdy chair or low wall for the dips.",
            vec![
                exercise("Incline Push-ups", 3, "10-12", 60),
                exercise("Chair Dips", 3, "8-10", 60),
                exercise("Shoulder Taps", 3, "20", 45),
            ],
        ),
        workout_day(
            4,
            "Lower Body",
            "Slow on the way down, drive up through the heels.",
            vec![
                exercise("Lunges", 3, "10 per leg", 60),
                exercise("Calf Raises", 3, "15", 45),
                exercise("Wall Sit", 3, "30 seconds", 60),
            ],
        ),
        workout_day(
            5,
            "Cardio Intervals",
            "Work hard for each set, rest fully between them.",
            vec![
                exercise("Jumping Jacks", 4, "30 seconds", 30),
                exercise("High Knees", 4, "20 seconds", 40),
                exercise("Mountain Climbers", 4, "20 seconds", 40),
            ],
        ),
        workout_day(
            6,
            "Core & Mobility",
            "Focus on form over speed.",
            vec![
                exercise("Plank", 3, "45 seconds", 45),
                exercise("Side Plank", 3, "20 seconds per side", 45),
                exercise("Bird Dog", 3, "10 per side", 45),
            ],
        ),
        WorkoutDayPlan {
            day_of_week: 7,
            title: "Rest Day".to_string(),
            description: Some("Full rest. Light stretching if you feel stiff.".to_string()),
            is_rest_day: true,
            exercises: vec![],
        },
    ];

    let nutrition_days = (1..=7u8)
        .map(|day_of_week| NutritionDayPlan {
            day_of_week,
            target_calories: Some(2000),
            target_protein_grams: Some(110),
            target_carbs_grams: Some(240),
            target_fats_grams: Some(60),
            notes: Some("Drink at least 2 litres of water through the day.".to_string()),
            meals: vec![
                meal(
                    MealType::Breakfast,
                    "Oat porridge with banana and groundnuts",
                    420,
                    16.0,
                    62.0,
                    12.0,
                    "1 bowl",
                ),
                meal(
                    MealType::Lunch,
                    "Rice and beans with steamed vegetables",
                    630,
                    24.0,
                    95.0,
                    14.0,
                    "1 plate",
                ),
                meal(
                    MealType::Dinner,
                    "Grilled fish with leafy greens",
                    550,
                    42.0,
                    30.0,
                    22.0,
                    "1 fillet with 2 cups of greens",
                ),
                meal(
                    MealType::Snack,
                    "Fresh fruit and a handful of nuts",
                    300,
                    8.0,
                    35.0,
                    14.0,
                    "1 piece of fruit, 30 g nuts",
                ),
            ],
        })
        .collect();

    GeneratedPlan {
        workout_days,
        nutrition_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_schema_valid() {
        assert_eq!(fallback_plan().validate(), Ok(()));
    }

    #[test]
    fn fallback_is_deterministic() {
        assert_eq!(fallback_plan(), fallback_plan());
    }

    #[test]
    fn fallback_covers_every_weekday_once() {
        let plan = fallback_plan();
        let mut workout_days: Vec<u8> = plan.workout_days.iter().map(|d| d.day_of_week).collect();
        let mut nutrition_days: Vec<u8> =
            plan.nutrition_days.iter().map(|d| d.day_of_week).collect();
        workout_days.sort_unstable();
        nutrition_days.sort_unstable();
        assert_eq!(workout_days, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(nutrition_days, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn fallback_has_one_rest_day() {
        let plan = fallback_plan();
        let rest_days: Vec<&WorkoutDayPlan> = plan
            .workout_days
            .iter()
            .filter(|d| d.is_rest_day)
            .collect();
        assert_eq!(rest_days.len(), 1);
        assert_eq!(rest_days[0].day_of_week, 7);
        assert!(rest_days[0].exercises.is_empty());
    }

    #[test]
    fn fallback_meals_have_non_negative_macros() {
        for day in fallback_plan().nutrition_days {
            assert!(!day.meals.is_empty());
            for m in day.meals {
                assert!(m.calories >= 0);
                assert!(m.protein_grams >= 0.0);
                assert!(m.carbs_grams >= 0.0);
                assert!(m.fats_grams >= 0.0);
            }
        }
    }
}
