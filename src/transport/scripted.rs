//! Scripted transport for development & testing
//!
//! Replays a fixed list of replies in order and records every request it
//! receives. The last reply repeats once the script is down to one entry.

use crate::error::AgentError;
use crate::models::CallResult;
use crate::transport::{ChatTransport, CompletionRequest};
use crate::Result;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One scripted outcome
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Returned as `Ok(CallResult)`
    Result(CallResult),
    /// Returned as an internal transport error
    Error(String),
}

impl ScriptedReply {
    /// Successful 200 with the given answer text
    pub fn text(text: impl Into<String>) -> Self {
        ScriptedReply::Result(CallResult::success(text, None, HashMap::new()))
    }

    /// Non-success HTTP status with an error body
    pub fn status(status: i32, error: impl Into<String>) -> Self {
        ScriptedReply::Result(CallResult::failure(status, error, HashMap::new()))
    }

    /// Connection-level fault
    pub fn fault(error: impl Into<String>) -> Self {
        ScriptedReply::Result(CallResult::transport_fault(error))
    }

    /// Internal error surfaced as `Err`
    pub fn error(message: impl Into<String>) -> Self {
        ScriptedReply::Error(message.into())
    }
}

#[derive(Default)]
struct Script {
    replies: VecDeque<ScriptedReply>,
    requests: Vec<CompletionRequest>,
}

/// Cloning shares the script, so a test can keep a handle after handing
/// the transport to an agent.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                replies: replies.into(),
                requests: Vec::new(),
            })),
        }
    }

    /// Same reply for every call
    pub fn always(reply: ScriptedReply) -> Self {
        Self::new(vec![reply])
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Every request seen, in call order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn complete(&self, request: &CompletionRequest) -> Result<CallResult> {
        let reply = {
            let mut script = self.lock();
            script.requests.push(request.clone());

            if script.replies.len() > 1 {
                script.replies.pop_front()
            } else {
                script.replies.front().cloned()
            }
        };

        match reply {
            Some(ScriptedReply::Result(result)) => Ok(result),
            Some(ScriptedReply::Error(message)) => Err(AgentError::Transport(message)),
            None => Err(AgentError::Transport("script exhausted".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentConfig;

    fn request(prompt: &str) -> CompletionRequest {
        CompletionRequest::new(prompt, &AgentConfig::default())
    }

    #[test]
    fn test_replays_in_order_then_repeats_last() {
        let transport = ScriptedTransport::new(vec![
            ScriptedReply::text("one"),
            ScriptedReply::status(500, "down"),
        ]);

        let first = tokio_test::block_on(transport.complete(&request("a"))).unwrap();
        let second = tokio_test::block_on(transport.complete(&request("b"))).unwrap();
        let third = tokio_test::block_on(transport.complete(&request("c"))).unwrap();

        assert_eq!(first.text(), "one");
        assert_eq!(second.status(), 500);
        assert_eq!(third.status(), 500);
        assert_eq!(transport.call_count(), 3);

        let prompts: Vec<String> = transport.requests().into_iter().map(|r| r.prompt).collect();
        assert_eq!(prompts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_error_reply_and_empty_script() {
        let failing = ScriptedTransport::always(ScriptedReply::error("boom"));
        let result = tokio_test::block_on(failing.complete(&request("a")));
        assert!(matches!(result, Err(AgentError::Transport(m)) if m == "boom"));

        let empty = ScriptedTransport::default();
        assert!(tokio_test::block_on(empty.complete(&request("a"))).is_err());
        assert_eq!(empty.call_count(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let transport = ScriptedTransport::always(ScriptedReply::text("x"));
        let handle = transport.clone();

        tokio_test::block_on(transport.complete(&request("a"))).unwrap();
        assert_eq!(handle.call_count(), 1);
    }
}
