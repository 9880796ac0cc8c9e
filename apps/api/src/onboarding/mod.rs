//! Onboarder — 30/60/90-day plan generation for a hired candidate.

pub mod handlers;
pub mod plan;
pub mod prompts;

use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::pipeline::audit::{append_best_effort, AuditRecord};
use crate::pipeline::envelope::PromptEnvelope;
use crate::pipeline::redact::{redact, MAX_TEXT_LEN};
use crate::pipeline::schema::{FieldKind, FieldSpec, Schema};
use crate::pipeline::{resolve, OutputSource};
use crate::state::AppState;

pub const AGENT: &str = "onboarder";

/// Structured candidate profile supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub name: Option<String>,
    pub role: String,
    pub department: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub start_date: Option<String>,
}

impl CandidateProfile {
    /// Runs every free-text field through the redactor.
    fn redacted(&self) -> Self {
        Self {
            name: self.name.as_deref().map(redact),
            role: redact(&self.role),
            department: redact(&self.department),
            skills: self.skills.iter().map(|s| redact(s)).collect(),
            start_date: self.start_date.as_deref().map(redact),
        }
    }
}

/// Required shape of the model's plan output: three ordered phases, each a
/// non-empty list of action strings.
pub const PLAN_SCHEMA: Schema = Schema {
    agent: AGENT,
    fields: &[
        FieldSpec {
            name: "day_30",
            kind: FieldKind::StringArray { min_items: 1 },
        },
        FieldSpec {
            name: "day_60",
            kind: FieldKind::StringArray { min_items: 1 },
        },
        FieldSpec {
            name: "day_90",
            kind: FieldKind::StringArray { min_items: 1 },
        },
    ],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingPlan {
    pub day_30: Vec<String>,
    pub day_60: Vec<String>,
    pub day_90: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OnboardingOutput {
    pub request_id: Uuid,
    pub plan: OnboardingPlan,
    pub source: OutputSource,
}

/// Runs the full Onboarder pipeline for one request.
pub async fn generate_plan(
    state: &AppState,
    profile: &CandidateProfile,
) -> Result<OnboardingOutput, AppError> {
    if profile.role.trim().is_empty() {
        return Err(AppError::Validation("profile.role is required".to_string()));
    }
    if profile.department.trim().is_empty() {
        return Err(AppError::Validation(
            "profile.department is required".to_string(),
        ));
    }
    let oversized = profile
        .name
        .iter()
        .chain([&profile.role, &profile.department])
        .chain(profile.skills.iter())
        .chain(profile.start_date.iter())
        .any(|field| field.chars().count() > MAX_TEXT_LEN);
    if oversized {
        return Err(AppError::PayloadTooLarge(format!(
            "profile fields exceed {MAX_TEXT_LEN} characters"
        )));
    }

    let request_id = Uuid::new_v4();
    let redacted = profile.redacted();

    let data = json!({"profile": &redacted});
    let envelope = PromptEnvelope::new(prompts::PLAN_SYSTEM, prompts::PROMPT_VERSION, data);

    let resolved = resolve(
        state.gateway.as_ref(),
        &envelope,
        &PLAN_SCHEMA,
        |_: &OnboardingPlan| Ok(()),
        || plan::templated_plan(&redacted),
    )
    .await;

    let record = AuditRecord::new(
        AGENT,
        request_id,
        prompts::PROMPT_VERSION,
        json!({"profile": redacted}),
        resolved.source,
    );
    append_best_effort(&state.audit, &record);

    Ok(OnboardingOutput {
        request_id,
        plan: resolved.output,
        source: resolved.source,
    })
}
