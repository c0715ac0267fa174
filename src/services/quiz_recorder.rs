use std::sync::Arc;

use crate::{
    auth::Session,
    errors::AppResult,
    models::domain::{AnswerRecord, Question, QuestionRecord, QuizRecord},
    repositories::QuizRepository,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuiz {
    pub quiz_id: String,
    pub questions_saved: usize,
    pub answers_saved: usize,
}

/// Best-effort persistence of generated questions for the signed-in user.
///
/// Nothing here ever fails the caller: every error is logged and swallowed.
/// A question that cannot be stored is skipped and the rest of the quiz is
/// still written, so a partial quiz can remain after a storage hiccup.
pub struct QuizRecorder {
    repository: Arc<dyn QuizRepository>,
}

impl QuizRecorder {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    pub async fn record(
        &self,
        session: &Session,
        questions: &[Question],
        content: &str,
        time_limit: Option<i32>,
    ) -> Option<RecordedQuiz> {
        let user_id = match session.user() {
            Ok(Some(claims)) => claims.sub.clone(),
            Ok(None) => {
                log::debug!("No signed-in user, generated quiz not saved");
                return None;
            }
            Err(e) => {
                log::warn!("Error saving to database: session lookup failed: {}", e);
                return None;
            }
        };

        match self.save(&user_id, questions, content, time_limit).await {
            Ok(recorded) => {
                log::info!(
                    "Saved quiz {} for user {} ({} questions, {} answers)",
                    recorded.quiz_id,
                    user_id,
                    recorded.questions_saved,
                    recorded.answers_saved
                );
                Some(recorded)
            }
            Err(e) => {
                log::error!("Error saving quiz: {}", e);
                None
            }
        }
    }

    async fn save(
        &self,
        user_id: &str,
        questions: &[Question],
        content: &str,
        time_limit: Option<i32>,
    ) -> AppResult<RecordedQuiz> {
        let quiz = self
            .repository
            .insert_quiz(QuizRecord::generated(user_id, content, time_limit))
            .await?;

        let mut recorded = RecordedQuiz {
            quiz_id: quiz.id.clone(),
            questions_saved: 0,
            answers_saved: 0,
        };

        for (position, question) in questions.iter().enumerate() {
            let stored = match self
                .repository
                .insert_question(QuestionRecord::from_question(&quiz.id, position, question))
                .await
            {
                Ok(stored) => stored,
                Err(e) => {
                    log::error!("Error saving question {} of quiz {}: {}", position, quiz.id, e);
                    continue;
                }
            };
            recorded.questions_saved += 1;

            for (answer_position, answer) in question.answers.iter().enumerate() {
                let row = AnswerRecord::from_answer(&stored.id, answer_position, answer);
                match self.repository.insert_answer(row).await {
                    Ok(_) => recorded.answers_saved += 1,
                    Err(e) => log::error!("Error saving answer for question {}: {}", stored.id, e),
                }
            }
        }

        Ok(recorded)
    }
}
