//! Agent loop - routes a question to a strategy
//!
//! QUESTION → CLASSIFY → STRATEGY → (FAILED? → DIRECT) → ANSWER

use crate::classifier::QuestionClassifier;
use crate::config::AgentConfig;
use crate::models::{AgentAnswer, StrategyKind};
use crate::strategy::Strategies;
use crate::transport::ChatTransport;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Dispatcher over the strategy set
pub struct Agent {
    transport: Box<dyn ChatTransport>,
    config: AgentConfig,
}

impl Agent {
    pub fn new(transport: Box<dyn ChatTransport>, config: AgentConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Classify, run the selected strategy, and retry once with Direct on failure.
    ///
    /// Transport-level failures never escape: a failed final result is
    /// reported through `AgentAnswer::ok` with the error text as `answer`.
    pub async fn run(&self, question: &str) -> AgentAnswer {
        let start_time = Instant::now();
        let request_id = Uuid::new_v4();

        let task_type = QuestionClassifier::classify(question);
        let strategy = StrategyKind::for_task(task_type);

        info!(
            request_id = %request_id,
            question_type = %task_type,
            strategy = %strategy,
            "Agent: routing question"
        );

        let strategies = Strategies::new(self.transport.as_ref(), &self.config);

        let mut result = strategies.run(strategy, question).await;
        let mut fell_back = false;

        if !result.is_ok() {
            warn!(
                request_id = %request_id,
                strategy = %strategy,
                status = result.status(),
                error = result.error().unwrap_or_default(),
                "Strategy failed - falling back to direct"
            );

            result = strategies.direct(question).await;
            fell_back = true;
        }

        let ok = result.is_ok();
        let elapsed_ms = start_time.elapsed().as_millis() as u64;

        if ok {
            info!(request_id = %request_id, fell_back, elapsed_ms, "Agent: answer ready");
        } else {
            warn!(request_id = %request_id, elapsed_ms, "Agent: no usable answer");
        }

        let (_, answer) = result.into_pair();

        AgentAnswer {
            request_id,
            task_type,
            strategy,
            fell_back,
            ok,
            answer,
        }
    }

    /// `(success, text)` form of `run`
    pub async fn answer(&self, question: &str) -> (bool, String) {
        let answer = self.run(question).await;
        (answer.ok, answer.answer)
    }
}
