//! Axum route handler for the Screening API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::screening::{screen, ScreeningOutput};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    pub resume_text: String,
    pub jd_text: String,
}

/// POST /api/v1/screen
///
/// Screens a resume against a job description. Always answers with a
/// schema-valid screening result; a model outage degrades to the
/// deterministic path, visible only through the `source` tag.
pub async fn handle_screen(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<ScreeningOutput>, AppError> {
    let output = screen(&state, &request.resume_text, &request.jd_text).await?;
    Ok(Json(output))
}
