use std::env;
use std::path::PathBuf;

use tracing::info;

/// Identifies the pipeline to the remote services, per their etiquette
/// policies. Override with the `USER_AGENT` env var.
const DEFAULT_USER_AGENT: &str =
    "peopleseed/0.1 (public-figure seed pipeline; contact@peopleseed.dev)";

/// Application configuration loaded from environment variables.
///
/// Store credentials are optional: without them the upload stage is
/// skipped with a warning and the run still produces file exports.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_url: Option<String>,
    pub store_key: Option<String>,
    pub data_dir: PathBuf,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            store_url: optional_env("STORE_URL"),
            store_key: optional_env("STORE_KEY"),
            data_dir: PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string())),
            user_agent: env::var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        }
    }

    /// Both credentials, or None if either is missing.
    pub fn store_credentials(&self) -> Option<(&str, &str)> {
        match (self.store_url.as_deref(), self.store_key.as_deref()) {
            (Some(url), Some(key)) => Some((url, key)),
            _ => None,
        }
    }

    /// Log the effective configuration without leaking secrets.
    pub fn log_redacted(&self) {
        info!(
            data_dir = %self.data_dir.display(),
            store_configured = self.store_credentials().is_some(),
            "Configuration loaded"
        );
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
