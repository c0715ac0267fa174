use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{AnswerRecord, Question, QuestionRecord, QuestionType, QuizRecord};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsResponse {
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummaryDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub time_limit: Option<i32>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl From<QuizRecord> for QuizSummaryDto {
    fn from(quiz: QuizRecord) -> Self {
        QuizSummaryDto {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            time_limit: quiz.time_limit,
            is_published: quiz.is_published,
            created_at: quiz.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDetailDto {
    #[serde(flatten)]
    pub quiz: QuizSummaryDto,
    pub questions: Vec<QuestionDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub points: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub answers: Vec<AnswerDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDto {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

impl QuestionDto {
    pub fn from_records(question: QuestionRecord, answers: Vec<AnswerRecord>) -> Self {
        QuestionDto {
            id: question.id,
            question: question.question_text,
            question_type: question.question_type,
            points: question.points,
            explanation: question.explanation,
            answers: answers
                .into_iter()
                .map(|answer| AnswerDto {
                    id: answer.id,
                    text: answer.answer_text,
                    is_correct: answer.is_correct,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}
