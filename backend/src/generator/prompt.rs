//! Prompt construction for the plan generator
//!
//! The prompt is a pure function of the profile snapshot and date range, so
//! the stored `ai_prompt_text` fully reproduces what the model was asked.

use chrono::NaiveDate;
use fitness_planner_shared::models::ProfileSnapshot;
use std::fmt::Write;

/// Build the generation prompt from a profile snapshot and date range.
pub fn build_plan_prompt(profile: &ProfileSnapshot, start: NaiveDate, end: NaiveDate) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(
        "You are a fitness and nutrition coach. Create a one-week workout and \
         nutrition plan for the following person.\n\n",
    );

    let _ = writeln!(
        prompt,
        "Weight: {}",
        opt_num(profile.current_weight_kg.map(|w| format!("{w} kg")))
    );
    let _ = writeln!(
        prompt,
        "Height: {}",
        opt_num(profile.height_cm.map(|h| format!("{h} cm")))
    );
    let _ = writeln!(prompt, "Age: {}", opt_num(profile.age.map(|a| a.to_string())));
    let _ = writeln!(
        prompt,
        "Gender: {}",
        opt_num(profile.gender.map(|g| g.as_str().to_string()))
    );
    let _ = writeln!(
        prompt,
        "Activity level: {}",
        opt_num(profile.activity_level.map(|a| a.description().to_string()))
    );
    let _ = writeln!(
        prompt,
        "Goal: {}",
        opt_num(profile.goal.map(|g| g.as_str().to_string()))
    );
    let dietary = profile.dietary_preferences.trim();
    let _ = writeln!(
        prompt,
        "Dietary preferences: {}",
        if dietary.is_empty() { "none" } else { dietary }
    );
    let _ = writeln!(prompt, "Plan period: {start} to {end} (inclusive)");

    prompt.push_str(
        "\nRespond with ONLY a JSON object, no prose and no markdown, with this shape:\n\
         {\n\
           \"workout_days\": [ { \"day_of_week\": 1-7, \"title\": str, \"description\": str, \
         \"is_rest_day\": bool, \"exercises\": [ { \"name\": str, \"sets\": int, \"reps\": str, \
         \"rest_period_seconds\": int, \"notes\": str } ] } ],\n\
           \"nutrition_days\": [ { \"day_of_week\": 1-7, \"target_calories\": int, \
         \"target_protein_grams\": int, \"target_carbs_grams\": int, \"target_fats_grams\": int, \
         \"notes\": str, \"meals\": [ { \"meal_type\": \"breakfast\"|\"lunch\"|\"dinner\"|\"snack\", \
         \"description\": str, \"calories\": int, \"protein_grams\": number, \
         \"carbs_grams\": number, \"fats_grams\": number, \"portion_size\": str } ] } ]\n\
         }\n\
         Rules: exactly 7 workout_days and 7 nutrition_days, day_of_week 1 (Monday) through 7 \
         (Sunday) each appearing exactly once in both lists; rest days have an empty exercises \
         list; every nutrition day has at least one meal; all numbers non-negative.",
    );

    prompt
}

fn opt_num(value: Option<String>) -> String {
    value.unwrap_or_else(|| "not specified".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitness_planner_shared::models::{ActivityLevel, FitnessGoal, Gender};

    fn snapshot() -> ProfileSnapshot {
        ProfileSnapshot {
            current_weight_kg: Some(70.0),
            height_cm: Some(175),
            age: Some(28),
            gender: Some(Gender::Female),
            activity_level: Some(ActivityLevel::ModeratelyActive),
            goal: Some(FitnessGoal::WeightLoss),
            dietary_preferences: "no red meat".to_string(),
        }
    }

    #[test]
    fn prompt_includes_profile_and_range() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let prompt = build_plan_prompt(&snapshot(), start, end);

        assert!(prompt.contains("70 kg"));
        assert!(prompt.contains("175 cm"));
        assert!(prompt.contains("weight_loss"));
        assert!(prompt.contains("no red meat"));
        assert!(prompt.contains("2024-03-04 to 2024-03-10"));
    }

    #[test]
    fn prompt_marks_missing_fields() {
        let profile = ProfileSnapshot {
            current_weight_kg: None,
            height_cm: None,
            age: None,
            gender: None,
            activity_level: None,
            goal: None,
            dietary_preferences: String::new(),
        };
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let prompt = build_plan_prompt(&profile, start, start);

        assert!(prompt.contains("Weight: not specified"));
        assert!(prompt.contains("Dietary preferences: none"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(
            build_plan_prompt(&snapshot(), start, end),
            build_plan_prompt(&snapshot(), start, end)
        );
    }
}
