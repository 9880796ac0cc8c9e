mod config;
mod errors;
mod llm_client;
mod onboarding;
mod pipeline;
mod policy;
mod routes;
mod screening;
mod state;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::AnthropicGateway;
use crate::pipeline::audit::AuditLog;
use crate::policy::store::PolicyStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HireFlow API v{}", env!("CARGO_PKG_VERSION"));

    // Load the policy store (read-only for the process lifetime)
    let policies = Arc::new(PolicyStore::load(Path::new(&config.policy_store_path))?);
    if policies.is_empty() {
        tracing::warn!("policy store is empty; PolicyAnswerer will only return the sentinel");
    }
    info!(
        "Policy store loaded: {} entries from {}",
        policies.len(),
        config.policy_store_path
    );

    // Open the append-only audit log
    let audit = Arc::new(AuditLog::open(Path::new(&config.audit_log_path))?);
    info!("Audit log opened at {}", config.audit_log_path);

    // Initialize the model gateway
    let gateway = Arc::new(AnthropicGateway::new(
        config.anthropic_api_key.clone(),
        config.llm_model.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    ));
    info!(
        "Model gateway initialized (model: {}, timeout: {}s)",
        config.llm_model, config.llm_timeout_secs
    );

    // Build app state
    let state = AppState {
        gateway,
        policies,
        audit,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
