// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::AppError,
    models::category::Category,
    quiz::service::QuizService,
    utils::jwt::Claims,
};

/// DTO for submitting an answer. A missing `answer` is treated as an empty guess.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[serde(default)]
    #[validate(length(max = 200, message = "Answer must be at most 200 characters."))]
    pub answer: String,
}

/// Lists the playable categories.
pub async fn list_categories() -> impl IntoResponse {
    Json(Category::ALL)
}

/// Starts a shuffled run of `category` for the current user.
///
/// Unknown categories are rejected here, before any session is touched.
pub async fn start_quiz(
    State(quiz): State<Arc<QuizService>>,
    Extension(claims): Extension<Claims>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let category: Category = category.parse()?;

    Ok(Json(quiz.start_quiz(user_id, category).await))
}

/// Returns the current emoji puzzle, or `{ "finished": true }`.
pub async fn get_question(
    State(quiz): State<Arc<QuizService>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    Ok(Json(quiz.current_question(user_id).await?))
}

/// Checks an answer (or pass token) against the current question.
pub async fn submit_answer(
    State(quiz): State<Arc<QuizService>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(Json(quiz.submit_answer(user_id, &payload.answer).await?))
}

/// Hands out the next hint and the decayed score.
pub async fn request_hint(
    State(quiz): State<Arc<QuizService>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    Ok(Json(quiz.request_hint(user_id).await?))
}

/// Discards the current run.
pub async fn abandon_quiz(
    State(quiz): State<Arc<QuizService>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    quiz.abandon(user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
