//! Model provider configuration, read from the environment.

use std::time::Duration;

use thiserror::Error;

use crate::credentials::ApiKey;

pub const API_KEY_ENV: &str = "API_KEY";
pub const MODEL_ENV: &str = "PLASTCUSTOM_AI_MODEL";
pub const ENDPOINT_ENV: &str = "PLASTCUSTOM_AI_ENDPOINT";
pub const TIMEOUT_ENV: &str = "PLASTCUSTOM_AI_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PLASTCUSTOM_AI_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),

    #[error("PLASTCUSTOM_AI_ENDPOINT must be an http(s) URL, got {0:?}")]
    InvalidEndpoint(String),
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Credential used when the host has no interactive picker.
    pub api_key: Option<ApiKey>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        match lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            Some(key) => cfg.api_key = Some(ApiKey::new(key.trim())),
            None => tracing::warn!(
                "{API_KEY_ENV} not set; predictions will use the fallback until a credential is selected"
            ),
        }

        if let Some(model) = lookup(MODEL_ENV).filter(|m| !m.trim().is_empty()) {
            cfg.model = model.trim().to_string();
        }

        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            let endpoint = endpoint.trim().trim_end_matches('/').to_string();
            if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
                return Err(ConfigError::InvalidEndpoint(endpoint));
            }
            cfg.endpoint = endpoint;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            cfg.timeout = Duration::from_secs(secs);
        }

        Ok(cfg)
    }
}
