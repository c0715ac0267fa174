use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{AnswerRecord, QuestionRecord, QuizRecord},
    repositories::QuizRepository,
};

pub mod fixtures {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use secrecy::{ExposeSecret, SecretString};

    use crate::{
        auth::Claims,
        config::Config,
        models::{
            domain::{Answer, Question, QuestionType},
            dto::request::GenerationRequest,
        },
    };

    /// Model reply holding exactly one mcq question.
    pub const ONE_QUESTION_REPLY: &str =
        r#"{"questions":[{"question":"Q","type":"mcq","answers":[{"text":"A","isCorrect":true}]}]}"#;

    pub fn one_question() -> Question {
        Question {
            text: "Q".to_string(),
            question_type: QuestionType::Mcq,
            answers: vec![Answer::new("A", true)],
            explanation: None,
        }
    }

    pub fn generation_request(content: &str) -> GenerationRequest {
        GenerationRequest {
            content: content.to_string(),
            question_count: 10,
            question_types: vec![QuestionType::Mcq],
            time_limit: None,
        }
    }

    /// HS256 token for `claims`, signed the way the sign-in flow does.
    pub fn signed_token(secret: &SecretString, claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
        )
        .expect("test token should be signed")
    }

    /// Full `Authorization` header value for a token valid under `Config::test_config()`.
    pub fn bearer_token(user_id: &str) -> String {
        let claims = Claims::new(user_id, &format!("{}@example.com", user_id), 1);
        format!(
            "Bearer {}",
            signed_token(&Config::test_config().jwt_secret, &claims)
        )
    }
}

pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

/// Vec-backed store that keeps insertion order and can be told to fail.
#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<Vec<QuizRecord>>>,
    questions: Arc<RwLock<Vec<QuestionRecord>>>,
    answers: Arc<RwLock<Vec<AnswerRecord>>>,
    fail_quiz_inserts: bool,
    fail_question_text: Option<String>,
    fail_answer_text: Option<String>,
    unhealthy: bool,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_quiz_inserts(mut self) -> Self {
        self.fail_quiz_inserts = true;
        self
    }

    pub fn failing_question_text(mut self, text: &str) -> Self {
        self.fail_question_text = Some(text.to_string());
        self
    }

    pub fn failing_answer_text(mut self, text: &str) -> Self {
        self.fail_answer_text = Some(text.to_string());
        self
    }

    pub fn unhealthy(mut self) -> Self {
        self.unhealthy = true;
        self
    }

    pub async fn quizzes(&self) -> Vec<QuizRecord> {
        self.quizzes.read().await.clone()
    }

    pub async fn questions(&self) -> Vec<QuestionRecord> {
        self.questions.read().await.clone()
    }

    pub async fn answers(&self) -> Vec<AnswerRecord> {
        self.answers.read().await.clone()
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn insert_quiz(&self, quiz: QuizRecord) -> AppResult<QuizRecord> {
        if self.fail_quiz_inserts {
            return Err(AppError::DatabaseError("quizzes unavailable".to_string()));
        }
        self.quizzes.write().await.push(quiz.clone());
        Ok(quiz)
    }

    async fn insert_question(&self, question: QuestionRecord) -> AppResult<QuestionRecord> {
        if self.fail_question_text.as_deref() == Some(question.question_text.as_str()) {
            return Err(AppError::DatabaseError("question rejected".to_string()));
        }
        self.questions.write().await.push(question.clone());
        Ok(question)
    }

    async fn insert_answer(&self, answer: AnswerRecord) -> AppResult<AnswerRecord> {
        if self.fail_answer_text.as_deref() == Some(answer.answer_text.as_str()) {
            return Err(AppError::DatabaseError("answer rejected".to_string()));
        }
        self.answers.write().await.push(answer.clone());
        Ok(answer)
    }

    async fn find_quiz(&self, id: &str) -> AppResult<Option<QuizRecord>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.iter().find(|q| q.id == id).cloned())
    }

    async fn list_quizzes_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizRecord>, i64)> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes
            .iter()
            .filter(|q| q.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = items.len() as i64;
        let page = items
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        Ok((page, total))
    }

    async fn find_questions(&self, quiz_id: &str) -> AppResult<Vec<QuestionRecord>> {
        let questions = self.questions.read().await;
        let mut items: Vec<_> = questions
            .iter()
            .filter(|q| q.quiz_id == quiz_id)
            .cloned()
            .collect();
        items.sort_by_key(|q| q.position);
        Ok(items)
    }

    async fn find_answers(&self, question_id: &str) -> AppResult<Vec<AnswerRecord>> {
        let answers = self.answers.read().await;
        let mut items: Vec<_> = answers
            .iter()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect();
        items.sort_by_key(|a| a.position);
        Ok(items)
    }

    async fn health_check(&self) -> AppResult<()> {
        if self.unhealthy {
            return Err(AppError::DatabaseError("ping failed".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn in_memory_repository_paginates_newest_first() {
        let repository = InMemoryQuizRepository::new();
        let mut older = QuizRecord::generated("u1", "first", None);
        older.created_at = older.created_at - chrono::Duration::minutes(5);
        let newer = QuizRecord::generated("u1", "second", None);

        repository.insert_quiz(older.clone()).await.unwrap();
        repository.insert_quiz(newer.clone()).await.unwrap();

        let (page, total) = repository.list_quizzes_by_user("u1", 0, 1).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(page, vec![newer]);

        let (page, _) = repository.list_quizzes_by_user("u1", 1, 1).await.unwrap();
        assert_eq!(page, vec![older]);
    }
}
