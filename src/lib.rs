//! Reasoning Agent
//!
//! A thin client-side agent that:
//! - Classifies a natural-language question into a task type
//! - Routes it to a prompt strategy (direct, chain-of-thought + self-refine, coding, prediction)
//! - Sends the composed prompt to an OpenAI-style chat-completion endpoint
//! - Extracts the final answer and falls back to a direct answer on failure
//!
//! FLOW:
//! QUESTION → CLASSIFY → STRATEGY → TRANSPORT → EXTRACT → ANSWER (→ FALLBACK?)

pub mod agent;
pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod extractor;
pub mod models;
pub mod strategy;
pub mod transport;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use agent::Agent;
pub use classifier::QuestionClassifier;
pub use config::AgentConfig;
pub use extractor::extract_final_answer;
pub use transport::{ChatTransport, CompletionRequest, HttpChatClient, ScriptedTransport};
