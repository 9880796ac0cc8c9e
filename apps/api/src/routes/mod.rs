pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::onboarding::handlers::handle_onboarding;
use crate::policy::handlers::handle_ask;
use crate::screening::handlers::handle_screen;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/screen", post(handle_screen))
        .route("/api/v1/onboarding", post(handle_onboarding))
        .route("/api/v1/policy/ask", post(handle_ask))
        .with_state(state)
}
