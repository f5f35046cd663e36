// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Wrong submissions allowed on one question before its answer is revealed.
pub const MAX_ATTEMPTS: u32 = 10;

/// Hints a player may consume on a single question.
pub const MAX_HINTS: u32 = 5;

/// Score of a question before any hint is taken.
pub const INITIAL_SCORE: u32 = 10;

/// Submissions that skip the current question without scoring.
pub const PASS_TOKENS: [&str; 3] = ["끝", "pass", "패스"];

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub question_data_dir: String,
    pub bind_addr: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://mojimoji.db?mode=rwc".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let question_data_dir = env::var("QUESTION_DATA_DIR")
            .unwrap_or_else(|_| "data".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            jwt_secret,
            question_data_dir,
            bind_addr,
            rust_log,
        }
    }
}
