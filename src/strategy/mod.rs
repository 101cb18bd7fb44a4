//! Prompt strategies
//!
//! Each strategy builds one prompt, makes one transport call and
//! post-processes the answer. `reasoning` composes chain-of-thought and
//! self-refinement with fallbacks. Strategies never return `Err`: internal
//! transport errors become a failed `CallResult`.

use crate::config::AgentConfig;
use crate::extractor::extract_final_answer;
use crate::models::{CallResult, StrategyKind};
use crate::transport::{ChatTransport, CompletionRequest};
use tracing::{debug, info, warn};

pub mod prompts;

use prompts::*;

/// Strategy set bound to one transport and config
pub struct Strategies<'a> {
    transport: &'a dyn ChatTransport,
    config: &'a AgentConfig,
}

impl<'a> Strategies<'a> {
    pub fn new(transport: &'a dyn ChatTransport, config: &'a AgentConfig) -> Self {
        Self { transport, config }
    }

    /// Run the strategy for `kind`
    pub async fn run(&self, kind: StrategyKind, question: &str) -> CallResult {
        match kind {
            StrategyKind::Direct => self.direct(question).await,
            StrategyKind::Reasoning => self.reasoning(question).await,
            StrategyKind::Coding => self.coding(question).await,
            StrategyKind::Prediction => self.prediction(question).await,
        }
    }

    /// Terse answer, extracted
    pub async fn direct(&self, question: &str) -> CallResult {
        let request = self
            .request(question)
            .with_system(DIRECT_SYSTEM)
            .with_max_tokens(DIRECT_MAX_TOKENS);

        self.call("direct", request)
            .await
            .map_text(extract_final_answer)
    }

    pub async fn chain_of_thought(&self, question: &str) -> CallResult {
        let request = self
            .request(chain_of_thought_prompt(question))
            .with_system(REASONING_SYSTEM)
            .with_max_tokens(CHAIN_OF_THOUGHT_MAX_TOKENS);

        self.call("chain_of_thought", request)
            .await
            .map_text(extract_final_answer)
    }

    pub async fn self_refine(&self, question: &str, prior_answer: &str) -> CallResult {
        let request = self
            .request(self_refine_prompt(question, prior_answer))
            .with_system(REASONING_SYSTEM)
            .with_max_tokens(SELF_REFINE_MAX_TOKENS);

        self.call("self_refine", request)
            .await
            .map_text(extract_final_answer)
    }

    /// Code only, returned verbatim (trimmed)
    pub async fn coding(&self, question: &str) -> CallResult {
        let request = self
            .request(question)
            .with_system(CODING_SYSTEM)
            .with_max_tokens(CODING_MAX_TOKENS);

        self.call("coding", request)
            .await
            .map_text(|text| text.trim().to_string())
    }

    /// Single prediction ending in `\boxed{...}`, returned trimmed
    pub async fn prediction(&self, question: &str) -> CallResult {
        let request = self
            .request(question)
            .with_system(PREDICTION_SYSTEM)
            .with_max_tokens(PREDICTION_MAX_TOKENS);

        self.call("prediction", request)
            .await
            .map_text(|text| text.trim().to_string())
    }

    /// Chain-of-thought, then self-refinement.
    ///
    /// - chain-of-thought fails: the direct answer is returned and refinement is skipped
    /// - refinement fails: the chain-of-thought answer is kept
    pub async fn reasoning(&self, question: &str) -> CallResult {
        let cot = self.chain_of_thought(question).await;
        if !cot.is_ok() {
            warn!(
                status = cot.status(),
                error = cot.error().unwrap_or_default(),
                "Chain-of-thought failed - answering directly"
            );
            return self.direct(question).await;
        }

        let refined = self.self_refine(question, cot.text()).await;
        if refined.is_ok() {
            debug!("Self-refinement accepted");
            refined
        } else {
            warn!(
                status = refined.status(),
                error = refined.error().unwrap_or_default(),
                "Self-refinement failed - keeping chain-of-thought answer"
            );
            cot
        }
    }

    fn request(&self, prompt: impl Into<String>) -> CompletionRequest {
        CompletionRequest::new(prompt, self.config).with_temperature(TEMPERATURE)
    }

    async fn call(&self, strategy: &'static str, request: CompletionRequest) -> CallResult {
        info!(strategy, max_tokens = request.max_tokens, "Running strategy");

        match self.transport.complete(&request).await {
            Ok(result) => {
                if !result.is_ok() {
                    warn!(
                        strategy,
                        status = result.status(),
                        error = result.error().unwrap_or_default(),
                        "Model call failed"
                    );
                }
                result
            }
            Err(e) => {
                warn!(strategy, "Error calling model: {}", e);
                CallResult::transport_fault(format!("Error calling model: {}", e))
            }
        }
    }
}
