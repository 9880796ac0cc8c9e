//! The shared validation-and-fallback pipeline.
//!
//! Every agent composes the same chain: redact → build envelope → model
//! gateway → schema validation → deterministic fallback if validation
//! fails → audit. `resolve` implements the gateway/validator/fallback
//! segment so each agent supplies only its schema, guard, and fallback
//! rule. Exactly one resolved output is produced per request.

pub mod audit;
pub mod envelope;
pub mod redact;
pub mod schema;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::llm_client::ModelGateway;
use envelope::PromptEnvelope;
use schema::{Schema, SchemaViolation};

/// Which path produced the output for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSource {
    Model,
    Fallback,
}

/// The resolved, schema-conformant output of one agent invocation.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub output: T,
    pub source: OutputSource,
}

/// Runs the model/validate/fallback segment of the pipeline.
///
/// A gateway failure is fed through validation as an empty payload, so it
/// fails there and takes the same fallback path as malformed output — the
/// coarse-grained policy is deliberate: any deviation from the contract,
/// "almost valid" or garbage, engages the same rule-based fallback.
///
/// `guard` lets an agent reject schema-valid output on semantic grounds
/// (e.g. a citation outside the retrieved snippet). The fallback value is
/// schema-valid by construction and is never re-validated.
pub async fn resolve<T, G, F>(
    gateway: &dyn ModelGateway,
    envelope: &PromptEnvelope,
    schema: &Schema,
    guard: G,
    fallback: F,
) -> Resolved<T>
where
    T: DeserializeOwned,
    G: Fn(&T) -> Result<(), SchemaViolation>,
    F: FnOnce() -> T,
{
    let raw = gateway
        .complete(envelope)
        .await
        .unwrap_or_default();

    let validated = schema::validate_as::<T>(&raw, schema).and_then(|output| {
        guard(&output)?;
        Ok(output)
    });

    match validated {
        Ok(output) => Resolved {
            output,
            source: OutputSource::Model,
        },
        Err(violation) => {
            info!(agent = schema.agent, %violation, "model output rejected, using deterministic fallback");
            Resolved {
                output: fallback(),
                source: OutputSource::Fallback,
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::config::Config;
    use crate::llm_client::{ModelGateway, ModelUnavailable};
    use crate::pipeline::audit::AuditLog;
    use crate::pipeline::envelope::PromptEnvelope;
    use crate::policy::store::{PolicyEntry, PolicyStore};
    use crate::state::AppState;

    /// Gateway that replays a fixed response, or fails when `response` is
    /// `None`. Records nothing; each test asserts on the resolved output.
    pub struct ScriptedGateway {
        pub response: Option<String>,
    }

    impl ScriptedGateway {
        pub fn replies(text: &str) -> Self {
            Self {
                response: Some(text.to_string()),
            }
        }

        pub fn unavailable() -> Self {
            Self { response: None }
        }
    }

    #[async_trait]
    impl ModelGateway for ScriptedGateway {
        async fn complete(&self, _envelope: &PromptEnvelope) -> Result<String, ModelUnavailable> {
            match &self.response {
                Some(text) => Ok(text.clone()),
                None => Err(ModelUnavailable::new("scripted outage")),
            }
        }
    }

    /// Builds a full `AppState` around a scripted gateway, with the audit
    /// log in a temp dir. The returned guard must outlive the state.
    pub fn test_state(gateway: ScriptedGateway) -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let audit_path = dir.path().join("audit.log");
        let state = AppState {
            gateway: Arc::new(gateway),
            policies: Arc::new(PolicyStore::from_entries(vec![PolicyEntry {
                id: "pol-vacation".to_string(),
                keywords: vec![
                    "vacation".to_string(),
                    "pto".to_string(),
                    "days".to_string(),
                ],
                body: "Employees receive 20 vacation days per year.".to_string(),
            }])),
            audit: Arc::new(AuditLog::open(&audit_path).unwrap()),
            config: Config {
                anthropic_api_key: "test-key".to_string(),
                llm_model: "test-model".to_string(),
                llm_timeout_secs: 1,
                audit_log_path: audit_path.to_string_lossy().into_owned(),
                policy_store_path: "unused".to_string(),
                port: 0,
                rust_log: "info".to_string(),
            },
        };
        (state, dir)
    }

    /// Reads back the audit lines written during a test.
    pub fn audit_lines(state: &AppState) -> Vec<String> {
        std::fs::read_to_string(&state.config.audit_log_path)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{FieldKind, FieldSpec};
    use serde::Deserialize;
    use serde_json::json;
    use test_support::ScriptedGateway;

    const SCHEMA: Schema = Schema {
        agent: "test",
        fields: &[FieldSpec {
            name: "answer",
            kind: FieldKind::NonEmptyString,
        }],
    };

    #[derive(Debug, Deserialize, PartialEq)]
    struct Out {
        answer: String,
    }

    fn fallback() -> Out {
        Out {
            answer: "deterministic".to_string(),
        }
    }

    fn envelope() -> PromptEnvelope {
        PromptEnvelope::new("inst", "v1.0", json!({"q": "test"}))
    }

    #[tokio::test]
    async fn test_valid_model_output_is_tagged_model() {
        let gateway = ScriptedGateway::replies(r#"{"answer": "from the model"}"#);
        let resolved = resolve(&gateway, &envelope(), &SCHEMA, |_: &Out| Ok(()), fallback).await;
        assert_eq!(resolved.source, OutputSource::Model);
        assert_eq!(resolved.output.answer, "from the model");
    }

    #[tokio::test]
    async fn test_malformed_output_falls_back() {
        let gateway = ScriptedGateway::replies("not json at all");
        let resolved = resolve(&gateway, &envelope(), &SCHEMA, |_: &Out| Ok(()), fallback).await;
        assert_eq!(resolved.source, OutputSource::Fallback);
        assert_eq!(resolved.output.answer, "deterministic");
    }

    #[tokio::test]
    async fn test_schema_violation_falls_back() {
        let gateway = ScriptedGateway::replies(r#"{"answer": ""}"#);
        let resolved = resolve(&gateway, &envelope(), &SCHEMA, |_: &Out| Ok(()), fallback).await;
        assert_eq!(resolved.source, OutputSource::Fallback);
    }

    #[tokio::test]
    async fn test_unavailable_gateway_falls_back() {
        let gateway = ScriptedGateway::unavailable();
        let resolved = resolve(&gateway, &envelope(), &SCHEMA, |_: &Out| Ok(()), fallback).await;
        assert_eq!(resolved.source, OutputSource::Fallback);
        assert_eq!(resolved.output.answer, "deterministic");
    }

    #[tokio::test]
    async fn test_guard_rejection_falls_back() {
        let gateway = ScriptedGateway::replies(r#"{"answer": "cites the wrong policy"}"#);
        let guard = |out: &Out| {
            if out.answer.contains("wrong policy") {
                Err(SchemaViolation::Guard("ungrounded citation".to_string()))
            } else {
                Ok(())
            }
        };
        let resolved = resolve(&gateway, &envelope(), &SCHEMA, guard, fallback).await;
        assert_eq!(resolved.source, OutputSource::Fallback);
    }

    #[test]
    fn test_output_source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&OutputSource::Model).unwrap(), r#""model""#);
        assert_eq!(
            serde_json::to_string(&OutputSource::Fallback).unwrap(),
            r#""fallback""#
        );
    }
}
