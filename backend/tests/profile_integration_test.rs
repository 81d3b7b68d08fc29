//! Integration tests for profile endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_profile_requires_auth() {
    let app = common::TestApp::new().await;

    let (status, _) = app.get("/api/v1/users/me/profile").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_get_profile_before_creation_not_found() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, _) = app.get_auth("/api/v1/users/me/profile", &user.token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_profile_computes_bmi() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let profile = app.create_profile(&user.token).await;

    // 70 kg at 175 cm
    assert_eq!(profile["bmi"], 22.86);
    assert_eq!(profile["goal"], "weight_loss");
    assert_eq!(profile["username"], user.username);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_profile_twice_conflicts() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;
    app.create_profile(&user.token).await;

    let body = json!({ "current_weight_kg": 80.0 });
    let (status, _) = app
        .post_auth("/api/v1/users/me/profile", &body.to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_profile_without_height_has_null_bmi() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let body = json!({ "current_weight_kg": 70.0 });
    let (status, response) = app
        .post_auth("/api/v1/users/me/profile", &body.to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let profile: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(profile["bmi"].is_null());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_patch_profile_updates_weight_and_bmi() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;
    app.create_profile(&user.token).await;

    let body = json!({ "current_weight_kg": 80.0 });
    let (status, response) = app
        .patch_auth("/api/v1/users/me/profile", &body.to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::OK);
    let profile: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(profile["current_weight_kg"], 80.0);
    // 80 / 1.75^2 = 26.12; height untouched by the partial update
    assert_eq!(profile["bmi"], 26.12);
    assert_eq!(profile["age"], 28);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_put_profile_replaces_all_fields() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;
    app.create_profile(&user.token).await;

    let body = json!({ "current_weight_kg": 82.0, "height_cm": 180 });
    let (status, response) = app
        .put_auth("/api/v1/users/me/profile", &body.to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::OK);
    let profile: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(profile["current_weight_kg"], 82.0);
    // Fields absent from a PUT are cleared
    assert!(profile["age"].is_null());
    assert!(profile["goal"].is_null());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_profile_rejects_invalid_height() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let body = json!({ "height_cm": 30 });
    let (status, _) = app
        .post_auth("/api/v1/users/me/profile", &body.to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_missing_profile_not_found() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let body = json!({ "current_weight_kg": 70.0 });
    let (status, _) = app
        .patch_auth("/api/v1/users/me/profile", &body.to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
