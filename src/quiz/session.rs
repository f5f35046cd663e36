// src/quiz/session.rs

use std::{fmt, sync::Arc};

use rand::{Rng, seq::SliceRandom};

use crate::{
    config::{MAX_ATTEMPTS, MAX_HINTS},
    models::{category::Category, question::Question},
    quiz::{
        answer::{answer_set, is_pass_token, normalize},
        scoring::score_for,
    },
};

/// Denials and invariant failures raised by the state machine itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    HintLimitExceeded,
    NoMoreHints,
    /// The run already reached the end of its play order.
    Finished,
    /// `order[cursor]` pointed outside the question list.
    MissingQuestion { cursor: usize, index: usize },
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for QuizError {}

/// Result of one `submit_answer` transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Matched the answer set. `score`/`hints_used` are the values held before the reset.
    Correct {
        score: u32,
        hints_used: u32,
        finished: bool,
    },
    /// A pass token skipped the question.
    Passed { finished: bool },
    /// The last allowed wrong submission; the canonical answer is revealed.
    Exhausted {
        revealed: String,
        score: u32,
        finished: bool,
    },
    /// Wrong, with attempts remaining.
    Incorrect { attempts_left: u32, score: u32 },
}

/// A hint handed out by `request_hint`, with the decayed score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub text: String,
    pub hints_used: u32,
    pub score: u32,
}

/// One player's progress through one shuffled run of a category.
///
/// All mutation goes through `submit_answer` and `request_hint`. The score is
/// never stored; it is always derived from `hints_used`.
#[derive(Debug, Clone)]
pub struct QuizSession {
    category: Category,
    questions: Arc<[Question]>,
    order: Vec<usize>,
    cursor: usize,
    attempts: u32,
    hints_used: u32,
    hint_cursor: usize,
}

impl QuizSession {
    /// Starts a run with a fresh uniformly random play order.
    pub fn start(category: Category, questions: Arc<[Question]>) -> Self {
        Self::start_with_rng(category, questions, &mut rand::thread_rng())
    }

    pub fn start_with_rng<R: Rng + ?Sized>(
        category: Category,
        questions: Arc<[Question]>,
        rng: &mut R,
    ) -> Self {
        let mut order: Vec<usize> = (0..questions.len()).collect();
        order.shuffle(rng);

        Self {
            category,
            questions,
            order,
            cursor: 0,
            attempts: 0,
            hints_used: 0,
            hint_cursor: 0,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn total_questions(&self) -> usize {
        self.order.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn hint_cursor(&self) -> usize {
        self.hint_cursor
    }

    pub fn score(&self) -> u32 {
        score_for(self.hints_used)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.order.len()
    }

    /// The question at `order[cursor]`, or `None` once the run is finished.
    pub fn current(&self) -> Result<Option<&Question>, QuizError> {
        let Some(&index) = self.order.get(self.cursor) else {
            return Ok(None);
        };

        self.questions
            .get(index)
            .map(Some)
            .ok_or(QuizError::MissingQuestion {
                cursor: self.cursor,
                index,
            })
    }

    /// Evaluates one submission against the current question and applies the transition.
    pub fn submit_answer(&mut self, text: &str) -> Result<SubmitOutcome, QuizError> {
        let questions = Arc::clone(&self.questions);
        let question = self.question_in(&questions)?;
        let submitted = normalize(text);

        if is_pass_token(&submitted) {
            self.advance();
            return Ok(SubmitOutcome::Passed {
                finished: self.is_finished(),
            });
        }

        if answer_set(&question.answer).contains(&submitted) {
            let score = self.score();
            let hints_used = self.hints_used;
            self.advance();
            return Ok(SubmitOutcome::Correct {
                score,
                hints_used,
                finished: self.is_finished(),
            });
        }

        self.attempts += 1;
        let score = self.score();

        if self.attempts >= MAX_ATTEMPTS {
            let revealed = question.answer.canonical();
            self.advance();
            return Ok(SubmitOutcome::Exhausted {
                revealed,
                score,
                finished: self.is_finished(),
            });
        }

        Ok(SubmitOutcome::Incorrect {
            attempts_left: MAX_ATTEMPTS - self.attempts,
            score,
        })
    }

    /// Hands out the next hint of the current question and decays the score.
    pub fn request_hint(&mut self) -> Result<Hint, QuizError> {
        let questions = Arc::clone(&self.questions);
        let question = self.question_in(&questions)?;

        if self.hints_used >= MAX_HINTS {
            return Err(QuizError::HintLimitExceeded);
        }

        let text = question
            .hints
            .get(self.hint_cursor)
            .ok_or(QuizError::NoMoreHints)?
            .clone();

        self.hints_used += 1;
        self.hint_cursor += 1;

        Ok(Hint {
            text,
            hints_used: self.hints_used,
            score: self.score(),
        })
    }

    fn question_in<'q>(&self, questions: &'q [Question]) -> Result<&'q Question, QuizError> {
        let index = *self.order.get(self.cursor).ok_or(QuizError::Finished)?;
        questions.get(index).ok_or(QuizError::MissingQuestion {
            cursor: self.cursor,
            index,
        })
    }

    fn advance(&mut self) {
        self.cursor += 1;
        self.attempts = 0;
        self.hints_used = 0;
        self.hint_cursor = 0;
    }
}
