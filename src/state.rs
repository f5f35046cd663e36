// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, quiz::service::QuizService};

#[derive(Clone)]
pub struct AppState {
    pub quiz: Arc<QuizService>,
    pub config: Config,
}

impl FromRef<AppState> for Arc<QuizService> {
    fn from_ref(state: &AppState) -> Self {
        state.quiz.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
