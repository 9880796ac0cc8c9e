//! Axum route handler for the Policy Q&A API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::policy::{answer, PolicyAnswerOutput};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// POST /api/v1/policy/ask
///
/// Answers a question grounded in the top-matching policy snippet, or
/// returns the `NO_MATCHING_POLICY` sentinel when nothing matches.
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<PolicyAnswerOutput>, AppError> {
    let output = answer(&state, &request.question).await?;
    Ok(Json(output))
}
