// src/quiz/scoring.rs

use crate::config::INITIAL_SCORE;

/// Maps the number of hints consumed on a question to its score.
///
/// 0 → 10, 1 → 9, 2 → 8, 3 → 6, 4 → 3, 5 → 1. Anything past the table clamps to 1.
pub fn score_for(hints_used: u32) -> u32 {
    match hints_used {
        0 => INITIAL_SCORE,
        1 => 9,
        2 => 8,
        3 => 6,
        4 => 3,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_table() {
        let scores: Vec<u32> = (0..=5).map(score_for).collect();
        assert_eq!(scores, vec![10, 9, 8, 6, 3, 1]);
    }

    #[test]
    fn test_no_hints_is_initial_score() {
        assert_eq!(score_for(0), INITIAL_SCORE);
    }

    #[test]
    fn test_clamps_past_table() {
        assert_eq!(score_for(6), 1);
        assert_eq!(score_for(u32::MAX), 1);
    }

    #[test]
    fn test_never_increases() {
        for used in 0..10 {
            assert!(score_for(used + 1) <= score_for(used));
        }
    }
}
