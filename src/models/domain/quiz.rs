use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::question::{Answer, Question, QuestionType};

const DESCRIPTION_PREFIX_CHARS: usize = 100;
const DEFAULT_QUESTION_POINTS: i32 = 1;

/// Row in the `quizzes` collection.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub time_limit: Option<i32>, // minutes
    pub is_published: bool,
    // Stored as a BSON date so the store sorts it chronologically.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Row in the `questions` collection.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionRecord {
    pub id: String,
    pub quiz_id: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub points: i32,
    pub position: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Row in the `answers` collection.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerRecord {
    pub id: String,
    pub question_id: String,
    pub answer_text: String,
    pub is_correct: bool,
    pub position: i32,
}

impl QuizRecord {
    pub fn generated(user_id: &str, content: &str, time_limit: Option<i32>) -> Self {
        let now = Utc::now();
        QuizRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: format!("Generated Quiz - {}", now.format("%Y-%m-%d %H:%M:%S UTC")),
            description: describe_content(content),
            time_limit,
            is_published: true,
            created_at: now,
        }
    }
}

impl QuestionRecord {
    pub fn from_question(quiz_id: &str, position: usize, question: &Question) -> Self {
        QuestionRecord {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            question_text: question.text.clone(),
            question_type: question.question_type,
            points: DEFAULT_QUESTION_POINTS,
            position: position as i32,
            explanation: question.explanation.clone(),
        }
    }
}

impl AnswerRecord {
    pub fn from_answer(question_id: &str, position: usize, answer: &Answer) -> Self {
        AnswerRecord {
            id: Uuid::new_v4().to_string(),
            question_id: question_id.to_string(),
            answer_text: answer.text.clone(),
            is_correct: answer.is_correct,
            position: position as i32,
        }
    }
}

/// Display-only summary of the source text; truncates on characters, not bytes.
pub fn describe_content(content: &str) -> String {
    let prefix: String = content.chars().take(DESCRIPTION_PREFIX_CHARS).collect();
    format!("Generated from content: {}...", prefix)
}
