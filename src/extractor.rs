//! Final-answer extraction
//!
//! Models are asked to reason and then finish with a `Final answer: X` line.
//! The extractor keeps only `X`; text without the marker passes through trimmed.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Greedy prefix so the last marker wins; nothing after it can contain another.
    static ref FINAL_ANSWER: Regex =
        Regex::new(r"(?is)^.*final answer:(.*)$").expect("final answer pattern is valid");
}

/// Return the trimmed content after the last `Final answer:` marker,
/// or the trimmed input when there is no marker.
pub fn extract_final_answer(text: &str) -> String {
    match FINAL_ANSWER.captures(text).and_then(|caps| caps.get(1)) {
        Some(answer) => answer.as_str().trim().to_string(),
        None => text.trim().to_string(),
    }
}
