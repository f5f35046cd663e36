// src/bank.rs

use std::{collections::HashMap, fs, path::Path, sync::Arc};

use tracing::{info, warn};

use crate::models::{category::Category, question::Question};

/// Read-only source of questions per category.
pub trait QuestionBank: Send + Sync {
    /// All questions of `category` in authored order. Empty when there is no data.
    fn load(&self, category: Category) -> Arc<[Question]>;
}

/// Question bank held entirely in memory, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionBank {
    by_category: HashMap<Category, Arc<[Question]>>,
}

impl InMemoryQuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_questions(mut self, category: Category, questions: Vec<Question>) -> Self {
        self.by_category.insert(category, questions.into());
        self
    }

    /// Reads `<dir>/<category>.json` for every category.
    ///
    /// A missing or malformed file leaves that category empty; it never fails startup.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut bank = Self::new();

        for category in Category::ALL {
            let path = dir.join(format!("{}.json", category.as_str()));

            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Question file unavailable, category will be empty");
                    continue;
                }
            };

            match parse_bank_file(category, &contents) {
                Ok(questions) => {
                    info!(%category, count = questions.len(), "Loaded questions");
                    bank = bank.with_questions(category, questions);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Malformed question file, category will be empty");
                }
            }
        }

        bank
    }
}

impl QuestionBank for InMemoryQuestionBank {
    fn load(&self, category: Category) -> Arc<[Question]> {
        self.by_category
            .get(&category)
            .cloned()
            .unwrap_or_else(|| Vec::new().into())
    }
}

/// Parses a data file shaped `{ "<category>": [ ...questions ] }`.
/// Other top-level keys are ignored; a missing key yields no questions.
fn parse_bank_file(category: Category, contents: &str) -> Result<Vec<Question>, serde_json::Error> {
    let mut root: HashMap<String, serde_json::Value> = serde_json::from_str(contents)?;

    match root.remove(category.as_str()) {
        Some(list) => serde_json::from_value(list),
        None => Ok(Vec::new()),
    }
}
