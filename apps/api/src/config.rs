use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails with context if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub llm_model: String,
    /// Bound on a single model call; a stalled model cannot hold request
    /// capacity past this.
    pub llm_timeout_secs: u64,
    pub audit_log_path: String,
    pub policy_store_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            llm_model: std::env::var("LLM_MODEL")
                .unwrap_or_else(|_| "claude-sonnet-4-5".to_string()),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a positive integer")?,
            audit_log_path: std::env::var("AUDIT_LOG_PATH")
                .unwrap_or_else(|_| "audit.log".to_string()),
            policy_store_path: std::env::var("POLICY_STORE_PATH")
                .unwrap_or_else(|_| "policies.json".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
