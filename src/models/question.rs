// src/models/question.rs

use serde::{Deserialize, Serialize};

use crate::quiz::answer::normalize;

/// One entry of the question bank. Read-only for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// The emoji puzzle shown to the player.
    pub emoji_hint: String,

    /// Accepted answer(s). Stored either as a bare string or a list in the data files.
    pub answer: Answer,

    /// Text hints handed out in order on request.
    #[serde(default)]
    pub hints: Vec<String>,
}

/// A question's answer field, single or multi-valued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    One(String),
    Many(Vec<String>),
}

impl Answer {
    /// Every accepted spelling, in authored order.
    pub fn variants(&self) -> &[String] {
        match self {
            Answer::One(answer) => std::slice::from_ref(answer),
            Answer::Many(answers) => answers,
        }
    }

    /// The answer revealed when a player runs out of attempts: the first
    /// spelling, in the same normalized form answers are compared in.
    pub fn canonical(&self) -> String {
        self.variants()
            .first()
            .map(|s| normalize(s))
            .unwrap_or_default()
    }
}

/// DTO for sending the current question to the client (no answer, no hints).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicQuestion {
    pub emoji_hint: String,
    pub score: u32,
    pub hints_used: u32,
}

/// Response for `GET /api/quiz/question`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CurrentQuestion {
    Playing(PublicQuestion),
    Finished { finished: bool },
}

/// Response for `POST /api/quiz/start/{category}`.
#[derive(Debug, Clone, Serialize)]
pub struct StartQuizResponse {
    pub category: super::category::Category,
    pub total_questions: usize,
    pub first_question: Option<PublicQuestion>,
}

/// Response for `POST /api/quiz/hint`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HintResponse {
    pub hint: String,
    pub hints_used: u32,
    pub score: u32,
}
