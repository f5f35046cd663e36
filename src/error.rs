// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::quiz::session::QuizError;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 500, the result store rejected a score record
    StoreWriteFailure(String),

    // 400 Bad Request
    BadRequest(String),

    // 400, category outside the fixed set
    InvalidCategory(String),

    // 400, five hints already consumed on this question
    HintLimitExceeded,

    // 400, the question has no further hints
    NoMoreHints,

    // 401 Unauthorized
    Unauthenticated,

    // 404, no run started for this player
    NoActiveQuiz,

    // 409, the run already reached its last question
    QuizFinished,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::StoreWriteFailure(msg) => {
                tracing::error!("Result store write failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "점수를 저장하지 못했습니다. 다시 제출해주세요.".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidCategory(category) => (
                StatusCode::BAD_REQUEST,
                format!("잘못된 카테고리입니다: {}", category),
            ),
            AppError::HintLimitExceeded => (
                StatusCode::BAD_REQUEST,
                "힌트를 모두 사용했습니다.".to_string(),
            ),
            AppError::NoMoreHints => (
                StatusCode::BAD_REQUEST,
                "더 이상 힌트가 없습니다.".to_string(),
            ),
            AppError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Not logged in".to_string())
            }
            AppError::NoActiveQuiz => (
                StatusCode::NOT_FOUND,
                "No active quiz. Pick a category first.".to_string(),
            ),
            AppError::QuizFinished => (
                StatusCode::CONFLICT,
                "Quiz already finished".to_string(),
            ),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

/// Maps state machine denials onto their HTTP counterparts.
/// A missing question means the session invariants broke, so it is reported as a 500.
impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::HintLimitExceeded => AppError::HintLimitExceeded,
            QuizError::NoMoreHints => AppError::NoMoreHints,
            QuizError::Finished => AppError::QuizFinished,
            QuizError::MissingQuestion { cursor, index } => AppError::InternalServerError(
                format!("no question at order[{}] = {}", cursor, index),
            ),
        }
    }
}
