use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::dto::response::{PaginatedResponse, QuestionDto, QuizDetailDto, QuizSummaryDto},
    repositories::QuizRepository,
};

/// Read side of stored quizzes, always scoped to the owner.
pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_quizzes(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<PaginatedResponse<QuizSummaryDto>> {
        let (quizzes, total) = self
            .repository
            .list_quizzes_by_user(user_id, offset, limit)
            .await?;

        Ok(PaginatedResponse {
            items: quizzes.into_iter().map(QuizSummaryDto::from).collect(),
            total,
            offset,
            limit,
        })
    }

    pub async fn get_quiz(&self, id: &str, user_id: &str) -> AppResult<QuizDetailDto> {
        // Someone else's quiz is reported as missing rather than forbidden.
        let quiz = self
            .repository
            .find_quiz(id)
            .await?
            .filter(|quiz| quiz.user_id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        let mut questions = Vec::new();
        for question in self.repository.find_questions(&quiz.id).await? {
            let answers = self.repository.find_answers(&question.id).await?;
            questions.push(QuestionDto::from_records(question, answers));
        }

        Ok(QuizDetailDto {
            quiz: quiz.into(),
            questions,
        })
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.repository.health_check().await
    }
}
