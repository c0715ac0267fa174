use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuizRepository, QuizRepository},
    services::{
        model_service::{ChatCompletionClient, OpenRouterClient},
        question_generator::{GenerationMode, QuestionGenerator},
        quiz_recorder::QuizRecorder,
        quiz_service::QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub question_generator: Arc<QuestionGenerator>,
    pub quiz_recorder: Arc<QuizRecorder>,
    pub quiz_service: Arc<QuizService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let client = Arc::new(OpenRouterClient::new(&config));

        Ok(Self::from_parts(config, quiz_repository, client))
    }

    /// Wires services around an already built store and upstream client.
    pub fn from_parts(
        config: Config,
        quiz_repository: Arc<dyn QuizRepository>,
        completion_client: Arc<dyn ChatCompletionClient>,
    ) -> Self {
        let mode = GenerationMode::from_mock_flag(config.use_mock_data);
        if mode == GenerationMode::Mock {
            log::warn!("USE_MOCK_DATA=true, serving sample questions without calling OpenRouter");
        }

        Self {
            question_generator: Arc::new(QuestionGenerator::new(mode, completion_client)),
            quiz_recorder: Arc::new(QuizRecorder::new(quiz_repository.clone())),
            quiz_service: Arc::new(QuizService::new(quiz_repository)),
            jwt_service: Arc::new(JwtService::new(&config.jwt_secret)),
            config: Arc::new(config),
        }
    }
}
