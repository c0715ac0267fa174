use std::sync::Arc;

use crate::{
    constants::prompts::{quiz_generation_prompt, QUIZ_SYSTEM_PROMPT},
    errors::{AppError, AppResult},
    models::{
        domain::{Answer, Question, QuestionType},
        dto::request::GenerationRequest,
    },
    services::{model_service::ChatCompletionClient, response_sanitizer::parse_generated_questions},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Fixed sample questions, no upstream call.
    Mock,
    Live,
}

impl GenerationMode {
    pub fn from_mock_flag(use_mock_data: bool) -> Self {
        if use_mock_data {
            GenerationMode::Mock
        } else {
            GenerationMode::Live
        }
    }
}

/// Turns source content into questions. Recording them is left to the caller.
pub struct QuestionGenerator {
    mode: GenerationMode,
    client: Arc<dyn ChatCompletionClient>,
}

impl QuestionGenerator {
    pub fn new(mode: GenerationMode, client: Arc<dyn ChatCompletionClient>) -> Self {
        Self { mode, client }
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    pub async fn generate(&self, request: &GenerationRequest) -> AppResult<Vec<Question>> {
        if request.content.trim().is_empty() {
            return Err(AppError::ValidationError("Content is required".to_string()));
        }

        if self.mode == GenerationMode::Mock {
            log::info!("Mock mode enabled, returning sample questions");
            return Ok(sample_questions());
        }

        let prompt = quiz_generation_prompt(
            &request.content,
            request.question_count,
            &request.question_types,
        );

        let reply = self
            .client
            .complete_json(QUIZ_SYSTEM_PROMPT, &prompt)
            .await
            .inspect_err(|e| log::error!("Error generating questions: {}", e))?;

        let generated = parse_generated_questions(&reply)?;

        log::info!(
            "Generated {} questions (requested {})",
            generated.questions.len(),
            request.question_count
        );
        Ok(generated.questions)
    }
}

/// Deterministic sample set served in mock mode.
pub fn sample_questions() -> Vec<Question> {
    vec![
        Question {
            text: "What is the capital of France?".to_string(),
            question_type: QuestionType::Mcq,
            answers: vec![
                Answer::new("Paris", true),
                Answer::new("London", false),
                Answer::new("Berlin", false),
                Answer::new("Madrid", false),
            ],
            explanation: Some("Paris is the capital and most populous city of France.".to_string()),
        },
        Question {
            text: "The Earth is flat.".to_string(),
            question_type: QuestionType::TrueFalse,
            answers: vec![Answer::new("True", false), Answer::new("False", true)],
            explanation: Some("The Earth is approximately spherical in shape.".to_string()),
        },
        Question {
            text: "What is the chemical symbol for water?".to_string(),
            question_type: QuestionType::ShortAnswer,
            answers: vec![Answer::new("H2O", true)],
            explanation: Some(
                "Water consists of two hydrogen atoms and one oxygen atom.".to_string(),
            ),
        },
    ]
}
