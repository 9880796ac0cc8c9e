use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ModelGateway;
use crate::pipeline::audit::AuditLog;
use crate::policy::store::PolicyStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. Constructed once at startup; nothing here is mutable across
/// requests except the append-only audit log, which serializes its own
/// writes.
#[derive(Clone)]
pub struct AppState {
    /// Model boundary. `Arc<dyn ModelGateway>` so tests can script it.
    pub gateway: Arc<dyn ModelGateway>,
    /// Read-only after startup; safe for unsynchronized concurrent reads.
    pub policies: Arc<PolicyStore>,
    pub audit: Arc<AuditLog>,
    pub config: Config,
}
