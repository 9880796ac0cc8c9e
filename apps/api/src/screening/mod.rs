//! TalentScout — resume screening with an explainable, deterministic score.
//!
//! The pipeline: redact resume and JD, extract features, compute the fit
//! score, ask the model to elaborate, validate the elaboration against the
//! screening schema, fall back to templated explanations when it fails.
//! The returned score and confidence are always the computed ones.

pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod scoring;

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

pub const AGENT: &str = "talent_scout";

/// Required shape of the model's screening output.
pub const SCREENING_SCHEMA: Schema = Schema {
    agent: AGENT,
    fields: &[
        FieldSpec {
            name: "score",
            kind: FieldKind::NumberInRange { min: 0.0, max: 100.0 },
        },
        FieldSpec {
            name: "confidence",
            kind: FieldKind::EnumString {
                allowed: &["low", "medium", "high"],
            },
        },
        FieldSpec {
            name: "explanations",
            kind: FieldKind::StringArray { min_items: 1 },
        },
    ],
};

/// Model-side output, validated against `SCREENING_SCHEMA`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningDraft {
    pub score: f64,
    pub confidence: String,
    pub explanations: Vec<String>,
}

/// Final screening result returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningOutput {
    pub request_id: Uuid,
    /// Deterministically computed, regardless of path.
    pub score: u32,
    pub confidence: &'static str,
    pub explanations: Vec<String>,
    pub source: OutputSource,
}

/// Runs the full TalentScout pipeline for one request.
pub async fn screen(
    state: &AppState,
    resume_text: &str,
    jd_text: &str,
) -> Result<ScreeningOutput, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text is required".to_string()));
    }
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text is required".to_string()));
    }
    if resume_text.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::PayloadTooLarge(format!(
            "resume_text exceeds {MAX_TEXT_LEN} characters"
        )));
    }
    if jd_text.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::PayloadTooLarge(format!(
            "jd_text exceeds {MAX_TEXT_LEN} characters"
        )));
    }

    let request_id = Uuid::new_v4();
    let redacted_resume = redact(resume_text);
    let redacted_jd = redact(jd_text);

    let features = extract::extract_resume(&redacted_resume);
    let requirements = extract::extract_jd(&redacted_jd);
    let fit = scoring::compute_fit(&features, &requirements);

    let data = json!({
        "resume_text": &redacted_resume,
        "jd_text": &redacted_jd,
        "computed": {
            "score": fit.score,
            "confidence": fit.confidence.as_str(),
            "features": &features,
            "requirements": &requirements,
        },
    });
    let envelope = PromptEnvelope::new(prompts::SCREEN_SYSTEM, prompts::PROMPT_VERSION, data);

    let fallback = || ScreeningDraft {
        score: fit.score as f64,
        confidence: fit.confidence.as_str().to_string(),
        explanations: scoring::templated_explanations(&fit, &requirements),
    };
    let resolved = resolve(
        state.gateway.as_ref(),
        &envelope,
        &SCREENING_SCHEMA,
        |_: &ScreeningDraft| Ok(()),
        fallback,
    )
    .await;

    let record = AuditRecord::new(
        AGENT,
        request_id,
        prompts::PROMPT_VERSION,
        json!({"resume_text": redacted_resume, "jd_text": redacted_jd}),
        resolved.source,
    );
    append_best_effort(&state.audit, &record);

    Ok(ScreeningOutput {
        request_id,
        score: fit.score,
        confidence: fit.confidence.as_str(),
        explanations: resolved.output.explanations,
        source: resolved.source,
    })
}
