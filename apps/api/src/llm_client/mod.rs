//! Model Gateway — the single point of entry for all LLM calls in HireFlow.
//!
//! ARCHITECTURAL RULE: no other module may call the Anthropic API directly.
//! All model interactions go through `ModelGateway`.
//!
//! The gateway makes exactly one bounded-timeout attempt. Transport errors,
//! timeouts, API errors, and empty responses all collapse into the single
//! `ModelUnavailable` condition: callers cannot distinguish them and must
//! not try — the pipeline feeds the failure through schema validation, which
//! rejects it and engages the deterministic fallback. Retry policy, if ever
//! wanted, belongs to a caller, not here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::pipeline::envelope::PromptEnvelope;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// The uniform failure condition reported for any gateway breakdown.
#[derive(Debug, Error)]
#[error("model unavailable: {reason}")]
pub struct ModelUnavailable {
    reason: String,
}

impl ModelUnavailable {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Boundary to the external model: hardened prompt in, raw text out.
/// Held in `AppState` as `Arc<dyn ModelGateway>` so tests can script it.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn complete(&self, envelope: &PromptEnvelope) -> Result<String, ModelUnavailable>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl AnthropicResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

/// Anthropic Messages API gateway.
pub struct AnthropicGateway {
    client: Client,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl AnthropicGateway {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            // reqwest's own timeout stays wider than ours; the
            // tokio::time::timeout in `complete` is the binding bound.
            client: Client::builder()
                .timeout(timeout + Duration::from_secs(5))
                .build()
                .unwrap_or_default(),
            api_key,
            model,
            timeout,
        }
    }

    async fn send(&self, envelope: &PromptEnvelope) -> Result<String, ModelUnavailable> {
        let request_body = AnthropicRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system: envelope.system(),
            messages: vec![AnthropicMessage {
                role: "user",
                content: envelope.user_content(),
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ModelUnavailable::new(format!("transport: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ModelUnavailable::new(format!("api status {status}")));
        }

        let body: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| ModelUnavailable::new(format!("malformed response: {e}")))?;

        debug!(
            input_tokens = body.usage.input_tokens,
            output_tokens = body.usage.output_tokens,
            "LLM call succeeded"
        );

        match body.text() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(ModelUnavailable::new("empty content")),
        }
    }
}

#[async_trait]
impl ModelGateway for AnthropicGateway {
    async fn complete(&self, envelope: &PromptEnvelope) -> Result<String, ModelUnavailable> {
        let result = tokio::time::timeout(self.timeout, self.send(envelope))
            .await
            .unwrap_or_else(|_| {
                Err(ModelUnavailable::new(format!(
                    "timed out after {:?}",
                    self.timeout
                )))
            });

        if let Err(e) = &result {
            warn!("model gateway: {e}");
        }
        result
    }
}
