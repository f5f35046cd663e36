// src/quiz/mod.rs

pub mod answer;
pub mod report;
pub mod scoring;
pub mod service;
pub mod session;
