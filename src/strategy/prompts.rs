//! Prompt builders and per-strategy budgets

pub const DIRECT_SYSTEM: &str =
    "You are a helpful assistant. Reply with only the final answer and give no explanation.";

pub const REASONING_SYSTEM: &str =
    "You are a careful assistant. Show your reasoning, then finish with a line of the form \
     'Final answer: <answer>'.";

pub const CODING_SYSTEM: &str =
    "You are a Python coding assistant. Return ONLY valid Python code that solves the task, \
     no explanations, no comments outside the code block.";

pub const PREDICTION_SYSTEM: &str =
    "You are an assistant that predicts future events. You MUST make a single clear prediction \
     and the final line must end with exactly one LaTeX-style box: \\boxed{YOUR_PREDICTION}.";

pub const DIRECT_MAX_TOKENS: u32 = 128;
pub const CHAIN_OF_THOUGHT_MAX_TOKENS: u32 = 512;
pub const SELF_REFINE_MAX_TOKENS: u32 = 2048;
pub const CODING_MAX_TOKENS: u32 = 2048;
pub const PREDICTION_MAX_TOKENS: u32 = 1024;

pub const TEMPERATURE: f32 = 0.0;

/// Step-by-step prompt ending in a `Final answer:` line
pub fn chain_of_thought_prompt(question: &str) -> String {
    format!(
        r#"Think through the problem step by step before answering.

Question:
{}

Work through it systematically. End your response with a single line:
Final answer: <answer>"#,
        question.trim()
    )
}

/// Verification prompt over a previous answer
pub fn self_refine_prompt(question: &str, prior_answer: &str) -> String {
    format!(
        r#"Question:
{}

Proposed answer:
{}

Check the proposed answer carefully. If it is correct, keep it. If it contains
errors, correct them. End your response with a single line:
Final answer: <answer>"#,
        question.trim(),
        prior_answer.trim()
    )
}
