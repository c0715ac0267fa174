use serde::Deserialize;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::QuestionType,
};

const DEFAULT_QUESTION_COUNT: u32 = 10;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsRequest {
    #[serde(default)]
    pub content: Option<String>,

    #[validate(range(min = 1, message = "questionCount must be at least 1"))]
    pub question_count: Option<u32>,

    #[validate(length(min = 1, message = "At least one question type is required"))]
    pub question_types: Option<Vec<QuestionType>>,

    #[validate(range(min = 1, message = "timeLimit must be a positive number of minutes"))]
    pub time_limit: Option<i32>,
}

/// Validated input for a single generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub content: String,
    pub question_count: u32,
    pub question_types: Vec<QuestionType>,
    pub time_limit: Option<i32>,
}

impl GenerateQuestionsRequest {
    /// Checks the body and applies defaults. Content is checked first so an
    /// empty submission is always reported as missing content.
    pub fn into_generation_request(self) -> AppResult<GenerationRequest> {
        let content = match self.content.as_deref() {
            Some(content) if !content.trim().is_empty() => content.to_string(),
            _ => return Err(AppError::ValidationError("Content is required".to_string())),
        };

        self.validate()?;

        let mut question_types: Vec<QuestionType> = Vec::new();
        for question_type in self.question_types.unwrap_or_else(|| vec![QuestionType::Mcq]) {
            if !question_types.contains(&question_type) {
                question_types.push(question_type);
            }
        }

        Ok(GenerationRequest {
            content,
            question_count: self.question_count.unwrap_or(DEFAULT_QUESTION_COUNT),
            question_types,
            time_limit: self.time_limit,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> GenerateQuestionsRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_defaults_are_applied() {
        let request = parse(r#"{"content": "Cells divide by mitosis."}"#)
            .into_generation_request()
            .unwrap();

        assert_eq!(request.question_count, 10);
        assert_eq!(request.question_types, vec![QuestionType::Mcq]);
        assert_eq!(request.time_limit, None);
    }

    #[test]
    fn test_missing_content_is_required() {
        let err = parse(r#"{"questionCount": 3}"#)
            .into_generation_request()
            .unwrap_err();
        assert!(err.to_string().contains("required"));
    }

    #[test]
    fn test_whitespace_content_is_required() {
        let err = parse(r#"{"content": "   \n\t"}"#)
            .into_generation_request()
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(ref msg) if msg.contains("required")));
    }

    #[test]
    fn test_zero_question_count_is_rejected() {
        let result = parse(r#"{"content": "text", "questionCount": 0}"#).into_generation_request();
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_empty_type_set_is_rejected() {
        let result = parse(r#"{"content": "text", "questionTypes": []}"#).into_generation_request();
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_duplicate_types_collapse_in_order() {
        let request = parse(
            r#"{"content": "text", "questionTypes": ["true_false", "mcq", "true_false"], "timeLimit": 15}"#,
        )
        .into_generation_request()
        .unwrap();

        assert_eq!(
            request.question_types,
            vec![QuestionType::TrueFalse, QuestionType::Mcq]
        );
        assert_eq!(request.time_limit, Some(15));
    }

    #[test]
    fn test_unknown_type_fails_to_deserialize() {
        let parsed = serde_json::from_str::<GenerateQuestionsRequest>(
            r#"{"content": "text", "questionTypes": ["essay"]}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_pagination_limits() {
        let params = PaginationParams {
            offset: Some(-5),
            limit: Some(1000),
        };
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 100);
        assert_eq!(PaginationParams::default().limit(), 20);
    }
}
