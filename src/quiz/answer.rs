// src/quiz/answer.rs

use std::collections::HashSet;

use crate::{config::PASS_TOKENS, models::question::Answer};

/// Canonical form used for every answer comparison: Unicode whitespace stripped
/// from both ends, then lowercased.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Flattens a single or multi-valued answer into its set of normalized spellings.
pub fn answer_set(answer: &Answer) -> HashSet<String> {
    answer.variants().iter().map(|a| normalize(a)).collect()
}

/// Whether an already-normalized submission asks to skip the question.
pub fn is_pass_token(normalized: &str) -> bool {
    PASS_TOKENS.contains(&normalized)
}
