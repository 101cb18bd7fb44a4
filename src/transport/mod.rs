//! Transport trait and implementations
//!
//! A transport performs exactly one request/response exchange with a
//! chat-completion endpoint and normalizes the outcome into a `CallResult`.
//! Network faults and non-success statuses are reported inside the
//! `CallResult`; `Err` is reserved for internal faults (bad URL, client setup).

use crate::config::AgentConfig;
use crate::models::CallResult;
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

pub mod http;
pub mod scripted;

pub use http::HttpChatClient;
pub use scripted::{ScriptedReply, ScriptedTransport};

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Reply with only the final answer, no explanation.";
pub const DEFAULT_MAX_TOKENS: u32 = 128;
pub const DEFAULT_TEMPERATURE: f32 = 0.0;

/// Everything needed for one chat-completion call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub system: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip)]
    pub timeout: Duration,
}

impl CompletionRequest {
    /// Request with default system prompt, temperature and budget
    pub fn new(prompt: impl Into<String>, config: &AgentConfig) -> Self {
        Self {
            prompt: prompt.into(),
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            model: config.model.clone(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: config.timeout,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Trait for a single chat-completion exchange
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// One attempt, no retries
    async fn complete(&self, request: &CompletionRequest) -> Result<CallResult>;
}
