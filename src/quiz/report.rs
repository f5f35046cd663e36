// src/quiz/report.rs

use chrono::Utc;
use serde::Serialize;

use crate::{
    models::{
        question::{CurrentQuestion, PublicQuestion},
        score_record::ScoreRecord,
    },
    quiz::session::{QuizError, QuizSession, SubmitOutcome},
};

const PASS_MESSAGE: &str = "다음 문제로 넘어갑니다!";
const LAST_QUESTION_MESSAGE: &str = "마지막 문제입니다!";

/// Response for `POST /api/quiz/answer`. Each variant is one wire shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerResponse {
    Correct {
        correct: bool,
        finished: bool,
        score: u32,
    },
    Completed {
        correct: bool,
        finished: bool,
        final_score: u32,
    },
    Skipped {
        correct: bool,
        next_question: bool,
        message: String,
    },
    SkippedLast {
        correct: bool,
        finished: bool,
        message: String,
    },
    Revealed {
        correct: bool,
        next_question: bool,
        finished: bool,
        message: String,
        score: u32,
    },
    Incorrect {
        correct: bool,
        attempts_left: u32,
        score: u32,
    },
}

impl From<&SubmitOutcome> for AnswerResponse {
    fn from(outcome: &SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Correct {
                score,
                finished: false,
                ..
            } => AnswerResponse::Correct {
                correct: true,
                finished: false,
                score: *score,
            },
            SubmitOutcome::Correct {
                score,
                finished: true,
                ..
            } => AnswerResponse::Completed {
                correct: true,
                finished: true,
                final_score: *score,
            },
            SubmitOutcome::Passed { finished: false } => AnswerResponse::Skipped {
                correct: false,
                next_question: true,
                message: PASS_MESSAGE.to_string(),
            },
            SubmitOutcome::Passed { finished: true } => AnswerResponse::SkippedLast {
                correct: false,
                finished: true,
                message: LAST_QUESTION_MESSAGE.to_string(),
            },
            SubmitOutcome::Exhausted {
                revealed,
                score,
                finished,
            } => AnswerResponse::Revealed {
                correct: false,
                next_question: true,
                finished: *finished,
                message: format!("정답은 \"{}\" 이었습니다.", revealed),
                score: *score,
            },
            SubmitOutcome::Incorrect {
                attempts_left,
                score,
            } => AnswerResponse::Incorrect {
                correct: false,
                attempts_left: *attempts_left,
                score: *score,
            },
        }
    }
}

/// The record to persist for a transition, if any.
///
/// Only a correct answer produces one. `session` is the state after the
/// transition; the score and hint count come from the outcome, which captured
/// them before the per-question reset.
pub fn score_record(
    user_id: i64,
    session: &QuizSession,
    outcome: &SubmitOutcome,
) -> Option<ScoreRecord> {
    let SubmitOutcome::Correct {
        score, hints_used, ..
    } = outcome
    else {
        return None;
    };

    Some(ScoreRecord {
        user_id,
        category: session.category().as_str().to_string(),
        score: i64::from(*score),
        total_questions: session.total_questions() as i64,
        hints_used: i64::from(*hints_used),
        created_at: Utc::now(),
    })
}

/// Public view of the question under the cursor. Never exposes answers or the play order.
pub fn current_question(session: &QuizSession) -> Result<CurrentQuestion, QuizError> {
    Ok(match session.current()? {
        Some(question) => CurrentQuestion::Playing(PublicQuestion {
            emoji_hint: question.emoji_hint.clone(),
            score: session.score(),
            hints_used: session.hints_used(),
        }),
        None => CurrentQuestion::Finished { finished: true },
    })
}
