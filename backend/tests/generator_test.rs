//! Contract tests for the external plan generator
//!
//! These drive the real HTTP client against a local wiremock server; no
//! database is needed. Every failure mode must collapse into the fallback
//! payload so callers always receive a schema-valid plan.

use chrono::NaiveDate;
use fitness_planner_backend::config::AiConfig;
use fitness_planner_backend::generator::{
    fallback::fallback_plan, generate_or_fallback, GenerationSource, OllamaGenerator,
};
use fitness_planner_shared::models::{ActivityLevel, FitnessGoal, Gender, ProfileSnapshot};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

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

fn range() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
    )
}

fn ai_config(url: &str, timeout_secs: u64) -> AiConfig {
    AiConfig {
        enabled: true,
        ollama_url: url.to_string(),
        model: "test-model".to_string(),
        timeout_secs,
    }
}

#[tokio::test]
async fn valid_model_output_is_used() {
    let server = MockServer::start().await;

    let mut plan = fallback_plan();
    plan.workout_days[0].title = "Model Week Kickoff".to_string();
    let raw = serde_json::to_string(&plan).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "stream": false,
            "format": "json",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": raw })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ai_config(&server.uri(), 5);
    let generator = OllamaGenerator::new(&config).unwrap();
    let (start, end) = range();

    let outcome = generate_or_fallback(&generator, &config, &snapshot(), start, end).await;

    assert_eq!(outcome.source, GenerationSource::Model);
    assert_eq!(outcome.plan.workout_days[0].title, "Model Week Kickoff");
    assert!(outcome.raw_response.is_some());
    assert!(outcome.prompt.contains("70 kg"));
}

#[tokio::test]
async fn fenced_model_output_is_accepted() {
    let server = MockServer::start().await;

    let raw = format!(
        "```json\n{}\n```",
        serde_json::to_string(&fallback_plan()).unwrap()
    );

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": raw })))
        .mount(&server)
        .await;

    let config = ai_config(&server.uri(), 5);
    let generator = OllamaGenerator::new(&config).unwrap();
    let (start, end) = range();

    let outcome = generate_or_fallback(&generator, &config, &snapshot(), start, end).await;

    assert_eq!(outcome.source, GenerationSource::Model);
    assert_eq!(outcome.plan.validate(), Ok(()));
}

#[tokio::test]
async fn non_json_output_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Here is your plan: do some push-ups.",
        })))
        .mount(&server)
        .await;

    let config = ai_config(&server.uri(), 5);
    let generator = OllamaGenerator::new(&config).unwrap();
    let (start, end) = range();

    let outcome = generate_or_fallback(&generator, &config, &snapshot(), start, end).await;

    assert_eq!(outcome.source, GenerationSource::Fallback);
    assert_eq!(outcome.plan, fallback_plan());
    // The rejected output is still kept for audit
    assert!(outcome.raw_response.is_some());
}

#[tokio::test]
async fn schema_invalid_output_falls_back() {
    let server = MockServer::start().await;

    // Valid JSON, wrong shape: an empty week
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": r#"{"workout_days": [], "nutrition_days": []}"#,
        })))
        .mount(&server)
        .await;

    let config = ai_config(&server.uri(), 5);
    let generator = OllamaGenerator::new(&config).unwrap();
    let (start, end) = range();

    let outcome = generate_or_fallback(&generator, &config, &snapshot(), start, end).await;

    assert_eq!(outcome.source, GenerationSource::Fallback);
    assert_eq!(outcome.plan, fallback_plan());
}

#[tokio::test]
async fn server_error_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = ai_config(&server.uri(), 5);
    let generator = OllamaGenerator::new(&config).unwrap();
    let (start, end) = range();

    let outcome = generate_or_fallback(&generator, &config, &snapshot(), start, end).await;

    assert_eq!(outcome.source, GenerationSource::Fallback);
    assert!(outcome.raw_response.is_none());
}

#[tokio::test]
async fn unreachable_server_falls_back() {
    // Nothing listens here
    let config = ai_config("http://127.0.0.1:9", 2);
    let generator = OllamaGenerator::new(&config).unwrap();
    let (start, end) = range();

    let outcome = generate_or_fallback(&generator, &config, &snapshot(), start, end).await;

    assert_eq!(outcome.source, GenerationSource::Fallback);
    assert_eq!(outcome.plan.validate(), Ok(()));
}

#[tokio::test]
async fn timeout_is_treated_as_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "{}" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ai_config(&server.uri(), 1);
    let generator = OllamaGenerator::new(&config).unwrap();
    let (start, end) = range();

    let outcome = generate_or_fallback(&generator, &config, &snapshot(), start, end).await;

    assert_eq!(outcome.source, GenerationSource::Fallback);
}

#[tokio::test]
async fn disabled_generation_never_calls_the_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = ai_config(&server.uri(), 5);
    config.enabled = false;
    let generator = OllamaGenerator::new(&config).unwrap();
    let (start, end) = range();

    let outcome = generate_or_fallback(&generator, &config, &snapshot(), start, end).await;

    assert_eq!(outcome.source, GenerationSource::Fallback);
    assert!(outcome.raw_response.is_none());
    // The prompt is still built and stored for audit
    assert!(outcome.prompt.contains("2024-03-04 to 2024-03-10"));
}
