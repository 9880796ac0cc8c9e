//! PolicyAnswerer — grounded policy Q&A over the static Policy Store.
//!
//! Retrieval picks the single top keyword match; only that snippet reaches
//! the prompt. A guard rejects any model answer citing an identifier other
//! than the retrieved one, so ungrounded citations can never leave the
//! pipeline. Zero keyword overlap short-circuits to the sentinel without a
//! model call.

pub mod handlers;
pub mod prompts;
pub mod store;

use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::pipeline::audit::{append_best_effort, AuditRecord};
use crate::pipeline::envelope::PromptEnvelope;
use crate::pipeline::redact::{redact, MAX_TEXT_LEN};
use crate::pipeline::schema::{FieldKind, FieldSpec, Schema, SchemaViolation};
use crate::pipeline::{resolve, OutputSource};
use crate::state::AppState;
use store::PolicyEntry;

pub const AGENT: &str = "policy_answerer";

/// Fixed response when no policy entry matches the question.
pub const NO_MATCHING_POLICY: &str = "NO_MATCHING_POLICY";

/// Required shape of the model's answer output.
pub const ANSWER_SCHEMA: Schema = Schema {
    agent: AGENT,
    fields: &[
        FieldSpec {
            name: "answer",
            kind: FieldKind::NonEmptyString,
        },
        FieldSpec {
            name: "citations",
            kind: FieldKind::StringArray { min_items: 1 },
        },
    ],
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyAnswer {
    pub answer: String,
    pub citations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyAnswerOutput {
    pub request_id: Uuid,
    pub answer: String,
    pub citations: Vec<String>,
    pub source: OutputSource,
}

/// Templated fallback: quote the retrieved snippet verbatim and cite it.
fn templated_answer(entry: &PolicyEntry) -> PolicyAnswer {
    PolicyAnswer {
        answer: format!("According to policy {}: \"{}\"", entry.id, entry.body),
        citations: vec![entry.id.clone()],
    }
}

/// Runs the full PolicyAnswerer pipeline for one request.
pub async fn answer(state: &AppState, question: &str) -> Result<PolicyAnswerOutput, AppError> {
    if question.trim().is_empty() {
        return Err(AppError::Validation("question is required".to_string()));
    }
    if question.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::PayloadTooLarge(format!(
            "question exceeds {MAX_TEXT_LEN} characters"
        )));
    }

    let request_id = Uuid::new_v4();
    let redacted_question = redact(question);

    let resolved = match state.policies.search(&redacted_question) {
        None => {
            // No grounding available: the sentinel is the fallback by
            // construction, and the model is never consulted.
            crate::pipeline::Resolved {
                output: PolicyAnswer {
                    answer: NO_MATCHING_POLICY.to_string(),
                    citations: vec![],
                },
                source: OutputSource::Fallback,
            }
        }
        Some(entry) => {
            let data = json!({
                "question": &redacted_question,
                "snippet": {"id": &entry.id, "body": &entry.body},
            });
            let envelope =
                PromptEnvelope::new(prompts::ANSWER_SYSTEM, prompts::PROMPT_VERSION, data);

            let grounded_id = entry.id.clone();
            let guard = move |out: &PolicyAnswer| {
                if out.citations.iter().all(|c| c == &grounded_id) {
                    Ok(())
                } else {
                    Err(SchemaViolation::Guard(format!(
                        "citation outside retrieved snippet '{grounded_id}'"
                    )))
                }
            };

            resolve(
                state.gateway.as_ref(),
                &envelope,
                &ANSWER_SCHEMA,
                guard,
                || templated_answer(entry),
            )
            .await
        }
    };

    let record = AuditRecord::new(
        AGENT,
        request_id,
        prompts::PROMPT_VERSION,
        json!({"question": redacted_question}),
        resolved.source,
    );
    append_best_effort(&state.audit, &record);

    Ok(PolicyAnswerOutput {
        request_id,
        answer: resolved.output.answer,
        citations: resolved.output.citations,
        source: resolved.source,
    })
}
