//! Agent configuration
//!
//! Built once at startup from the environment (optionally seeded from `.env`)
//! and passed by reference to everything that needs it.

use crate::error::AgentError;
use crate::Result;
use std::time::Duration;

pub const DEFAULT_API_KEY: &str = "cse476";
pub const DEFAULT_API_BASE: &str = "http://10.4.58.53:41701/v1";
pub const DEFAULT_MODEL: &str = "bens_model";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AgentConfig {
    /// Load from `.env` + process environment
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys use defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    AgentError::Config(format!("REQUEST_TIMEOUT_SECS is not a number: {}", raw))
                })?;
                if secs == 0 {
                    return Err(AgentError::Config(
                        "REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        let api_base = get("API_BASE").unwrap_or(defaults.api_base);

        Ok(Self {
            api_key: get("OPENAI_API_KEY").unwrap_or(defaults.api_key),
            api_base: api_base.trim_end_matches('/').to_string(),
            model: get("MODEL_NAME").unwrap_or(defaults.model),
            timeout,
        })
    }

    /// Full chat-completion endpoint URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}
