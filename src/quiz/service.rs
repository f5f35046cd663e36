// src/quiz/service.rs

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, RwLock};
use tracing::{info, instrument};

use crate::{
    bank::QuestionBank,
    error::AppError,
    models::{
        category::Category,
        question::{CurrentQuestion, HintResponse, PublicQuestion, StartQuizResponse},
    },
    quiz::{
        report::{self, AnswerResponse},
        session::{QuizSession, SubmitOutcome},
    },
    store::ResultStore,
};

type SessionHandle = Arc<Mutex<QuizSession>>;

/// Owns every active run, keyed by authenticated user id.
///
/// Each session sits behind its own mutex, so requests for the same player
/// are applied one at a time while different players never contend.
pub struct QuizService {
    bank: Arc<dyn QuestionBank>,
    store: Arc<dyn ResultStore>,
    sessions: RwLock<HashMap<i64, SessionHandle>>,
}

impl QuizService {
    pub fn new(bank: Arc<dyn QuestionBank>, store: Arc<dyn ResultStore>) -> Self {
        Self {
            bank,
            store,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Starts a new run, replacing any run the player already had.
    #[instrument(level = "info", skip(self))]
    pub async fn start_quiz(&self, user_id: i64, category: Category) -> StartQuizResponse {
        let session = QuizSession::start(category, self.bank.load(category));

        // A fresh session cannot point outside its own question list.
        let first_question = session.current().ok().flatten().map(|q| PublicQuestion {
            emoji_hint: q.emoji_hint.clone(),
            score: session.score(),
            hints_used: session.hints_used(),
        });
        let total_questions = session.total_questions();

        self.sessions
            .write()
            .await
            .insert(user_id, Arc::new(Mutex::new(session)));

        info!(total_questions, "Quiz started");

        StartQuizResponse {
            category,
            total_questions,
            first_question,
        }
    }

    pub async fn current_question(&self, user_id: i64) -> Result<CurrentQuestion, AppError> {
        let handle = self.session(user_id).await?;
        let session = handle.lock().await;

        Ok(report::current_question(&session)?)
    }

    /// Applies one answer submission.
    ///
    /// The transition runs on a copy of the session. A correct answer is
    /// persisted before that copy replaces the live session, so a failed write
    /// leaves the player exactly where they were.
    #[instrument(level = "info", skip(self, text))]
    pub async fn submit_answer(&self, user_id: i64, text: &str) -> Result<AnswerResponse, AppError> {
        let handle = self.session(user_id).await?;
        let mut session = handle.lock().await;

        let mut next = session.clone();
        let outcome = next.submit_answer(text)?;

        if let Some(record) = report::score_record(user_id, &next, &outcome) {
            self.store.append(&record).await.map_err(|e| match e {
                AppError::StoreWriteFailure(_) => e,
                other => AppError::StoreWriteFailure(other.to_string()),
            })?;
        }

        *session = next;

        let category = session.category();
        match &outcome {
            SubmitOutcome::Correct { score, finished, .. } => {
                info!(%category, score, finished, "Correct answer recorded")
            }
            SubmitOutcome::Passed { finished } => info!(%category, finished, "Question passed"),
            SubmitOutcome::Exhausted { finished, .. } => {
                info!(%category, finished, "Attempts exhausted, answer revealed")
            }
            SubmitOutcome::Incorrect { .. } => {}
        }

        Ok(AnswerResponse::from(&outcome))
    }

    pub async fn request_hint(&self, user_id: i64) -> Result<HintResponse, AppError> {
        let handle = self.session(user_id).await?;
        let mut session = handle.lock().await;

        let hint = session.request_hint()?;

        Ok(HintResponse {
            hint: hint.text,
            hints_used: hint.hints_used,
            score: hint.score,
        })
    }

    /// Discards the player's run.
    pub async fn abandon(&self, user_id: i64) -> Result<(), AppError> {
        let removed = self.sessions.write().await.remove(&user_id);
        if removed.is_none() {
            return Err(AppError::NoActiveQuiz);
        }

        info!(user_id, "Quiz abandoned");
        Ok(())
    }

    async fn session(&self, user_id: i64) -> Result<SessionHandle, AppError> {
        self.sessions
            .read()
            .await
            .get(&user_id)
            .cloned()
            .ok_or(AppError::NoActiveQuiz)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::{
        bank::InMemoryQuestionBank,
        models::{
            question::{Answer, Question},
            score_record::ScoreRecord,
        },
    };

    #[derive(Default)]
    struct RecordingStore {
        records: std::sync::Mutex<Vec<ScoreRecord>>,
        failing: AtomicBool,
    }

    impl RecordingStore {
        fn count(&self) -> usize {
            self.records.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ResultStore for RecordingStore {
        async fn append(&self, record: &ScoreRecord) -> Result<(), AppError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(AppError::StoreWriteFailure("disk full".to_string()));
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn service() -> (QuizService, Arc<RecordingStore>) {
        let bank = InMemoryQuestionBank::new().with_questions(
            Category::Movie,
            vec![
                Question {
                    emoji_hint: "🚢🧊".to_string(),
                    answer: Answer::One("Titanic".to_string()),
                    hints: vec!["1997".to_string()],
                },
                Question {
                    emoji_hint: "🦁👑".to_string(),
                    answer: Answer::Many(vec!["라이온 킹".to_string(), "The Lion King".to_string()]),
                    hints: vec![],
                },
            ],
        );
        let store = Arc::new(RecordingStore::default());
        (QuizService::new(Arc::new(bank), store.clone()), store)
    }

    fn answer_for(emoji: &str) -> &'static str {
        match emoji {
            "🚢🧊" => "titanic",
            _ => "the lion king",
        }
    }

    async fn current_emoji(service: &QuizService, user_id: i64) -> String {
        match service.current_question(user_id).await.unwrap() {
            CurrentQuestion::Playing(q) => q.emoji_hint,
            CurrentQuestion::Finished { .. } => panic!("run already finished"),
        }
    }

    #[tokio::test]
    async fn test_requires_started_quiz() {
        let (service, _) = service();
        assert!(matches!(
            service.current_question(1).await,
            Err(AppError::NoActiveQuiz)
        ));
        assert!(matches!(
            service.submit_answer(1, "pass").await,
            Err(AppError::NoActiveQuiz)
        ));
        assert!(matches!(service.request_hint(1).await, Err(AppError::NoActiveQuiz)));
        assert!(matches!(service.abandon(1).await, Err(AppError::NoActiveQuiz)));
    }

    #[tokio::test]
    async fn test_full_run_writes_one_record_per_correct_answer() {
        let (service, store) = service();
        let started = service.start_quiz(1, Category::Movie).await;
        assert_eq!(started.total_questions, 2);
        assert!(started.first_question.is_some());

        let emoji = current_emoji(&service, 1).await;
        let first = service.submit_answer(1, answer_for(&emoji)).await.unwrap();
        assert!(matches!(first, AnswerResponse::Correct { score: 10, .. }));

        let emoji = current_emoji(&service, 1).await;
        let last = service
            .submit_answer(1, &format!(" {} ", answer_for(&emoji).to_uppercase()))
            .await
            .unwrap();
        assert!(matches!(last, AnswerResponse::Completed { final_score: 10, .. }));

        assert_eq!(store.count(), 2);
        assert!(matches!(
            service.current_question(1).await.unwrap(),
            CurrentQuestion::Finished { finished: true }
        ));
        assert!(matches!(
            service.submit_answer(1, "pass").await,
            Err(AppError::QuizFinished)
        ));
    }

    #[tokio::test]
    async fn test_store_failure_blocks_advance() {
        let (service, store) = service();
        service.start_quiz(1, Category::Movie).await;
        let emoji = current_emoji(&service, 1).await;
        service.submit_answer(1, "wrong").await.unwrap();

        store.failing.store(true, Ordering::SeqCst);
        let err = service.submit_answer(1, answer_for(&emoji)).await.unwrap_err();
        assert!(matches!(err, AppError::StoreWriteFailure(_)));

        // Still on the same question, wrong-answer count untouched.
        assert_eq!(current_emoji(&service, 1).await, emoji);
        let wrong = service.submit_answer(1, "wrong again").await.unwrap();
        assert!(matches!(wrong, AnswerResponse::Incorrect { attempts_left: 8, .. }));

        store.failing.store(false, Ordering::SeqCst);
        let retried = service.submit_answer(1, answer_for(&emoji)).await.unwrap();
        assert!(matches!(retried, AnswerResponse::Correct { .. }));
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn test_pass_and_exhaust_never_write() {
        let (service, store) = service();
        service.start_quiz(1, Category::Movie).await;

        let skipped = service.submit_answer(1, "Pass").await.unwrap();
        assert!(matches!(skipped, AnswerResponse::Skipped { .. }));

        for _ in 0..9 {
            service.submit_answer(1, "nope").await.unwrap();
        }
        let revealed = service.submit_answer(1, "nope").await.unwrap();
        assert!(matches!(
            revealed,
            AnswerResponse::Revealed { finished: true, .. }
        ));
        assert_eq!(store.count(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_are_serialized() {
        let (service, store) = service();
        let service = Arc::new(service);
        service.start_quiz(1, Category::Movie).await;

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..15 {
            let service = Arc::clone(&service);
            tasks.spawn(async move { service.submit_answer(1, "nope").await });
        }

        let mut revealed = 0;
        let mut incorrect = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined.unwrap().unwrap() {
                AnswerResponse::Revealed { finished, .. } => {
                    assert!(!finished);
                    revealed += 1;
                }
                AnswerResponse::Incorrect { .. } => incorrect += 1,
                other => panic!("unexpected outcome {other:?}"),
            }
        }

        // Ten on the first question, five on the second: one advance, no lost updates.
        assert_eq!(revealed, 1);
        assert_eq!(incorrect, 14);
        assert!(matches!(
            service.current_question(1).await.unwrap(),
            CurrentQuestion::Playing(_)
        ));
        let next = service.submit_answer(1, "nope").await.unwrap();
        assert!(matches!(next, AnswerResponse::Incorrect { attempts_left: 4, .. }));
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn test_restart_replaces_session() {
        let (service, _) = service();
        service.start_quiz(1, Category::Movie).await;
        service.submit_answer(1, "pass").await.unwrap();

        let restarted = service.start_quiz(1, Category::Drama).await;
        assert_eq!(restarted.total_questions, 0);
        assert!(restarted.first_question.is_none());
        assert!(matches!(
            service.current_question(1).await.unwrap(),
            CurrentQuestion::Finished { finished: true }
        ));
    }

    #[tokio::test]
    async fn test_players_are_isolated() {
        let (service, _) = service();
        service.start_quiz(1, Category::Movie).await;
        service.start_quiz(2, Category::Movie).await;

        service.submit_answer(1, "pass").await.unwrap();
        service.submit_answer(1, "pass").await.unwrap();

        assert!(matches!(
            service.current_question(1).await.unwrap(),
            CurrentQuestion::Finished { .. }
        ));
        assert!(matches!(
            service.current_question(2).await.unwrap(),
            CurrentQuestion::Playing(_)
        ));

        service.abandon(1).await.unwrap();
        assert!(matches!(
            service.current_question(1).await,
            Err(AppError::NoActiveQuiz)
        ));
    }
}
