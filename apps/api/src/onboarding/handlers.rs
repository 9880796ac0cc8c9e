//! Axum route handler for the Onboarding API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::onboarding::{generate_plan, CandidateProfile, OnboardingOutput};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OnboardingRequest {
    pub profile: CandidateProfile,
}

/// POST /api/v1/onboarding
///
/// Generates a 30/60/90-day plan for the given candidate profile.
pub async fn handle_onboarding(
    State(state): State<AppState>,
    Json(request): Json<OnboardingRequest>,
) -> Result<Json<OnboardingOutput>, AppError> {
    let output = generate_plan(&state, &request.profile).await?;
    Ok(Json(output))
}
