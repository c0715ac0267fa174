use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{AnswerRecord, QuestionRecord, QuizRecord},
};

/// Three-table quiz store. Inserts return the stored row, ids are assigned by the caller.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn insert_quiz(&self, quiz: QuizRecord) -> AppResult<QuizRecord>;
    async fn insert_question(&self, question: QuestionRecord) -> AppResult<QuestionRecord>;
    async fn insert_answer(&self, answer: AnswerRecord) -> AppResult<AnswerRecord>;
    async fn find_quiz(&self, id: &str) -> AppResult<Option<QuizRecord>>;
    async fn list_quizzes_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizRecord>, i64)>;
    /// Questions of a quiz ordered by position.
    async fn find_questions(&self, quiz_id: &str) -> AppResult<Vec<QuestionRecord>>;
    /// Answers of a question ordered by position.
    async fn find_answers(&self, question_id: &str) -> AppResult<Vec<AnswerRecord>>;
    async fn health_check(&self) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    db: Database,
    quizzes: Collection<QuizRecord>,
    questions: Collection<QuestionRecord>,
    answers: Collection<AnswerRecord>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            quizzes: db.quizzes(),
            questions: db.questions(),
            answers: db.answers(),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz collections");

        let unique_id = || {
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("id_unique".to_string())
                        .build(),
                )
                .build()
        };

        self.quizzes.create_index(unique_id()).await?;
        self.questions.create_index(unique_id()).await?;
        self.answers.create_index(unique_id()).await?;

        self.quizzes
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "user_id": 1, "created_at": -1 })
                    .build(),
            )
            .await?;
        self.questions
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "quiz_id": 1, "position": 1 })
                    .build(),
            )
            .await?;
        self.answers
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "question_id": 1, "position": 1 })
                    .build(),
            )
            .await?;

        log::info!("Successfully created indexes for quiz collections");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn insert_quiz(&self, quiz: QuizRecord) -> AppResult<QuizRecord> {
        self.quizzes.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn insert_question(&self, question: QuestionRecord) -> AppResult<QuestionRecord> {
        self.questions.insert_one(&question).await?;
        Ok(question)
    }

    async fn insert_answer(&self, answer: AnswerRecord) -> AppResult<AnswerRecord> {
        self.answers.insert_one(&answer).await?;
        Ok(answer)
    }

    async fn find_quiz(&self, id: &str) -> AppResult<Option<QuizRecord>> {
        let quiz = self.quizzes.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn list_quizzes_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizRecord>, i64)> {
        let filter = doc! { "user_id": user_id };

        let total = self.quizzes.count_documents(filter.clone()).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .build();

        let cursor = self.quizzes.find(filter).with_options(find_options).await?;
        let items: Vec<QuizRecord> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn find_questions(&self, quiz_id: &str) -> AppResult<Vec<QuestionRecord>> {
        let find_options = FindOptions::builder().sort(doc! { "position": 1 }).build();

        let cursor = self
            .questions
            .find(doc! { "quiz_id": quiz_id })
            .with_options(find_options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_answers(&self, question_id: &str) -> AppResult<Vec<AnswerRecord>> {
        let find_options = FindOptions::builder().sort(doc! { "position": 1 }).build();

        let cursor = self
            .answers
            .find(doc! { "question_id": question_id })
            .with_options(find_options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn health_check(&self) -> AppResult<()> {
        self.db.health_check().await
    }
}
