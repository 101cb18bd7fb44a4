//! Core data models for the reasoning agent

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// HTTP status the chat endpoint uses for success
pub const SUCCESS_STATUS: i32 = 200;

/// Status recorded when no HTTP response was received at all
pub const TRANSPORT_FAULT_STATUS: i32 = -1;

//
// ================= Enums =================
//

/// Task type a question is classified into
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Coding,
    FuturePrediction,
    Math,
    Planning,
    Default,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Coding => "coding",
            TaskType::FuturePrediction => "future_prediction",
            TaskType::Math => "math",
            TaskType::Planning => "planning",
            TaskType::Default => "default",
        }
    }
}

/// Prompt strategy the dispatcher can run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Direct,
    Reasoning,
    Coding,
    Prediction,
}

impl StrategyKind {
    /// Strategy selected for a task type
    pub fn for_task(task_type: TaskType) -> Self {
        match task_type {
            TaskType::Coding => StrategyKind::Coding,
            TaskType::FuturePrediction => StrategyKind::Prediction,
            TaskType::Math | TaskType::Planning => StrategyKind::Reasoning,
            TaskType::Default => StrategyKind::Direct,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Direct => "direct",
            StrategyKind::Reasoning => "reasoning",
            StrategyKind::Coding => "coding",
            StrategyKind::Prediction => "prediction",
        }
    }
}

//
// ================= Call Result =================
//

/// Normalized outcome of one transport invocation.
///
/// `ok` is true only for a success status with a readable answer, and
/// `error` is `Some` exactly when `ok` is false. Fields are private so
/// that invariant can only be built through the constructors.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CallResult {
    ok: bool,
    text: String,
    raw: Option<serde_json::Value>,
    status: i32,
    error: Option<String>,
    headers: HashMap<String, String>,
}

impl CallResult {
    pub fn success(
        text: impl Into<String>,
        raw: Option<serde_json::Value>,
        headers: HashMap<String, String>,
    ) -> Self {
        Self {
            ok: true,
            text: text.into(),
            raw,
            status: SUCCESS_STATUS,
            error: None,
            headers,
        }
    }

    pub fn failure(
        status: i32,
        error: impl Into<String>,
        headers: HashMap<String, String>,
    ) -> Self {
        Self {
            ok: false,
            text: String::new(),
            raw: None,
            status,
            error: Some(error.into()),
            headers,
        }
    }

    /// No response was received (connect, DNS, timeout)
    pub fn transport_fault(error: impl Into<String>) -> Self {
        Self::failure(TRANSPORT_FAULT_STATUS, error, HashMap::new())
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn raw(&self) -> Option<&serde_json::Value> {
        self.raw.as_ref()
    }

    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Post-process the answer text of a successful result
    pub fn map_text<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&str) -> String,
    {
        if self.ok {
            self.text = f(&self.text);
        }
        self
    }

    /// Answer text on success, error message on failure
    pub fn into_pair(self) -> (bool, String) {
        if self.ok {
            (true, self.text)
        } else {
            (false, self.error.unwrap_or_default())
        }
    }
}

//
// ================= Agent Answer =================
//

/// What the dispatcher hands back to its caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentAnswer {
    pub request_id: Uuid,
    pub task_type: TaskType,
    pub strategy: StrategyKind,
    pub fell_back: bool,
    pub ok: bool,
    pub answer: String,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
