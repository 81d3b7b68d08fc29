//! External plan generator
//!
//! The generator is an opaque collaborator: given a prompt built from a
//! profile snapshot and a date range, it either returns a schema-valid
//! [`GeneratedPlan`] or fails. Every failure mode (disabled, unreachable,
//! timeout, malformed output, schema violation) collapses into the static
//! fallback plan, so callers always receive a well-formed payload.

pub mod fallback;
pub mod prompt;

use crate::config::AiConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use fitness_planner_shared::models::ProfileSnapshot;
use fitness_planner_shared::plan::GeneratedPlan;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Where a generation payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationSource {
    Model,
    Fallback,
}

/// The result of a generation attempt; construction of this type implies a
/// payload that passed [`GeneratedPlan::validate`]
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub plan: GeneratedPlan,
    /// The exact prompt sent to the model, stored on the plan for audit
    pub prompt: String,
    /// The model's raw output when it produced one, stored for audit
    pub raw_response: Option<serde_json::Value>,
    pub source: GenerationSource,
}

/// Text-in, text-out interface to the model backend
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Client for an Ollama-compatible generation endpoint
pub struct OllamaGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaGenerator {
    pub fn new(config: &AiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build generator HTTP client")?;

        Ok(Self {
            client,
            base_url: config.ollama_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait]
impl PlanGenerator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format: "json",
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("generation request failed")?
            .error_for_status()
            .context("generation request returned error status")?;

        let payload: GenerateResponse = response
            .json()
            .await
            .context("generation response was not valid JSON")?;

        Ok(payload.response)
    }
}

/// Parse the model's raw text into a validated plan payload.
///
/// Models wrap JSON in markdown fences often enough that stripping them here
/// is cheaper than failing over to the fallback.
pub fn parse_plan_response(raw: &str) -> Result<GeneratedPlan> {
    let trimmed = strip_code_fences(raw);
    let plan: GeneratedPlan =
        serde_json::from_str(trimmed).context("model output did not match the plan schema")?;
    plan.validate().context("plan payload failed validation")?;
    Ok(plan)
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag after the opening fence
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_end_matches('`').trim()
}

/// Run a generation attempt, substituting the deterministic fallback payload
/// on any failure. Never fails: the fallback is static and schema-valid.
pub async fn generate_or_fallback(
    generator: &dyn PlanGenerator,
    ai: &AiConfig,
    profile: &ProfileSnapshot,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> GenerationOutcome {
    let prompt = prompt::build_plan_prompt(profile, start_date, end_date);

    if !ai.enabled {
        info!("plan generation disabled, using fallback plan");
        return GenerationOutcome {
            plan: fallback::fallback_plan(),
            prompt,
            raw_response: None,
            source: GenerationSource::Fallback,
        };
    }

    match generator.generate(&prompt).await {
        Ok(raw) => match parse_plan_response(&raw) {
            Ok(plan) => GenerationOutcome {
                plan,
                prompt,
                // Parsed above, so this only falls back to a raw string when
                // the model wrapped its JSON in fences
                raw_response: Some(
                    serde_json::from_str(strip_code_fences(&raw))
                        .unwrap_or_else(|_| serde_json::Value::String(raw)),
                ),
                source: GenerationSource::Model,
            },
            Err(err) => {
                warn!("model output rejected, using fallback plan: {err:#}");
                GenerationOutcome {
                    plan: fallback::fallback_plan(),
                    prompt,
                    raw_response: Some(serde_json::Value::String(raw)),
                    source: GenerationSource::Fallback,
                }
            }
        },
        Err(err) => {
            warn!("plan generation failed, using fallback plan: {err:#}");
            GenerationOutcome {
                plan: fallback::fallback_plan(),
                prompt,
                raw_response: None,
                source: GenerationSource::Fallback,
            }
        }
    }
}
