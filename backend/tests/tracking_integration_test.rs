//! Integration tests for tracking endpoints
//!
//! Each test sets up a user with a profile and a fallback-generated plan,
//! then tracks against the plan's items.

mod common;

use axum::http::StatusCode;
use common::{TestApp, TestUser};
use serde_json::json;
use uuid::Uuid;

/// A user with a profile and one plan covering 2024-03-04 (Monday) through
/// 2024-03-10 (Sunday), plus the plan aggregate
async fn user_with_plan(app: &TestApp) -> (TestUser, serde_json::Value) {
    let user = app.create_test_user().await;
    app.create_profile(&user.token).await;
    let plan = app.create_plan(&user.token, "2024-03-04", "2024-03-10").await;
    (user, plan)
}

fn first_exercise_id(plan: &serde_json::Value) -> String {
    plan["workout_days"][0]["exercises"][0]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

fn first_meal_id(plan: &serde_json::Value) -> String {
    plan["nutrition_days"][0]["meals"][0]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_tracking_requires_auth() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/api/v1/users/me/workout-tracking").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_workout_tracking() {
    let app = TestApp::new().await;
    let (user, plan) = user_with_plan(&app).await;
    let exercise_id = first_exercise_id(&plan);

    let body = json!({
        "exercise_id": exercise_id,
        "date_completed": "2024-03-04",
        "sets_completed": 3,
    });
    let (status, response) = app
        .post_auth("/api/v1/users/me/workout-tracking", &body.to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let record: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(record["exercise_id"], exercise_id);
    assert_eq!(record["sets_completed"], 3);
    assert_eq!(record["notes"], "");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_duplicate_workout_tracking_conflicts() {
    let app = TestApp::new().await;
    let (user, plan) = user_with_plan(&app).await;

    let body = json!({
        "exercise_id": first_exercise_id(&plan),
        "date_completed": "2024-03-04",
        "sets_completed": 3,
    });
    let (status, _) = app
        .post_auth("/api/v1/users/me/workout-tracking", &body.to_string(), &user.token)
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Same exercise, same date
    let (status, _) = app
        .post_auth("/api/v1/users/me/workout-tracking", &body.to_string(), &user.token)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_workout_tracking_unknown_exercise_not_found() {
    let app = TestApp::new().await;
    let (user, _) = user_with_plan(&app).await;

    let body = json!({
        "exercise_id": Uuid::new_v4(),
        "date_completed": "2024-03-04",
        "sets_completed": 3,
    });
    let (status, _) = app
        .post_auth("/api/v1/users/me/workout-tracking", &body.to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_negative_sets_rejected() {
    let app = TestApp::new().await;
    let (user, plan) = user_with_plan(&app).await;

    let body = json!({
        "exercise_id": first_exercise_id(&plan),
        "date_completed": "2024-03-04",
        "sets_completed": -1,
    });
    let (status, _) = app
        .post_auth("/api/v1/users/me/workout-tracking", &body.to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_list_workout_tracking_filters_by_date() {
    let app = TestApp::new().await;
    let (user, plan) = user_with_plan(&app).await;
    let exercises = plan["workout_days"][0]["exercises"].as_array().unwrap();

    for (exercise, date) in exercises.iter().zip(["2024-03-04", "2024-03-11"]) {
        let body = json!({
            "exercise_id": exercise["id"],
            "date_completed": date,
            "sets_completed": 3,
        });
        let (status, _) = app
            .post_auth("/api/v1/users/me/workout-tracking", &body.to_string(), &user.token)
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, response) = app
        .get_auth(
            "/api/v1/users/me/workout-tracking?date=2024-03-04",
            &user.token,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let records: serde_json::Value = serde_json::from_str(&response).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["date_completed"], "2024-03-04");

    // Without the filter both records come back
    let (_, response) = app
        .get_auth("/api/v1/users/me/workout-tracking", &user.token)
        .await;
    let records: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_delete_workout_tracking_scoped_to_owner() {
    let app = TestApp::new().await;
    let (alice, plan) = user_with_plan(&app).await;

    let body = json!({
        "exercise_id": first_exercise_id(&plan),
        "date_completed": "2024-03-04",
        "sets_completed": 3,
    });
    let (_, response) = app
        .post_auth("/api/v1/users/me/workout-tracking", &body.to_string(), &alice.token)
        .await;
    let record: serde_json::Value = serde_json::from_str(&response).unwrap();
    let record_id = record["id"].as_str().unwrap().to_string();

    let bob = app.create_test_user().await;

    // Another user's record is indistinguishable from a missing one
    let (status, _) = app
        .delete_auth(
            &format!("/api/v1/users/me/workout-tracking/{record_id}"),
            &bob.token,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The failed delete left the record in place
    let (_, response) = app
        .get_auth("/api/v1/users/me/workout-tracking", &alice.token)
        .await;
    let records: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 1);

    let (status, _) = app
        .delete_auth(
            &format!("/api/v1/users/me/workout-tracking/{record_id}"),
            &alice.token,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_meal_tracking_defaults_to_full_portion() {
    let app = TestApp::new().await;
    let (user, plan) = user_with_plan(&app).await;

    let body = json!({
        "meal_id": first_meal_id(&plan),
        "date_completed": "2024-03-04",
    });
    let (status, response) = app
        .post_auth("/api/v1/users/me/meal-tracking", &body.to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let record: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(record["portion_consumed"], 1.0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_meal_tracking_rejects_invalid_portion() {
    let app = TestApp::new().await;
    let (user, plan) = user_with_plan(&app).await;

    let body = json!({
        "meal_id": first_meal_id(&plan),
        "date_completed": "2024-03-04",
        "portion_consumed": -0.5,
    });
    let (status, _) = app
        .post_auth("/api/v1/users/me/meal-tracking", &body.to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_duplicate_meal_tracking_conflicts() {
    let app = TestApp::new().await;
    let (user, plan) = user_with_plan(&app).await;

    let body = json!({
        "meal_id": first_meal_id(&plan),
        "date_completed": "2024-03-04",
        "portion_consumed": 0.5,
    });
    let (status, _) = app
        .post_auth("/api/v1/users/me/meal-tracking", &body.to_string(), &user.token)
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .post_auth("/api/v1/users/me/meal-tracking", &body.to_string(), &user.token)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_water_tracking_allows_multiple_entries_per_day() {
    let app = TestApp::new().await;
    let (user, plan) = user_with_plan(&app).await;
    let nutrition_day_id = plan["nutrition_days"][0]["id"].as_str().unwrap();

    for litres in [0.5, 0.75] {
        let body = json!({
            "nutrition_day_id": nutrition_day_id,
            "date": "2024-03-04",
            "litres_consumed": litres,
        });
        let (status, _) = app
            .post_auth("/api/v1/users/me/water-tracking", &body.to_string(), &user.token)
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, response) = app
        .get_auth("/api/v1/users/me/water-tracking?date=2024-03-04", &user.token)
        .await;

    assert_eq!(status, StatusCode::OK);
    let records: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_water_tracking_rejects_non_positive_litres() {
    let app = TestApp::new().await;
    let (user, plan) = user_with_plan(&app).await;

    let body = json!({
        "nutrition_day_id": plan["nutrition_days"][0]["id"],
        "date": "2024-03-04",
        "litres_consumed": 0.0,
    });
    let (status, _) = app
        .post_auth("/api/v1/users/me/water-tracking", &body.to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
