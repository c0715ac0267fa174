use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::CurrentSession,
    errors::AppError,
    models::dto::{request::GenerateQuestionsRequest, response::GenerateQuestionsResponse},
    services::question_generator::GenerationMode,
};

/// Generates questions for the submitted content and, for signed-in callers,
/// saves them as a quiz. Saving never affects the response status.
#[post("/api/generate-questions")]
async fn generate_questions(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuestionsRequest>,
    session: CurrentSession,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner().into_generation_request()?;

    let questions = state.question_generator.generate(&request).await?;

    let quiz_id = match state.question_generator.mode() {
        GenerationMode::Live => state
            .quiz_recorder
            .record(&session.0, &questions, &request.content, request.time_limit)
            .await
            .map(|recorded| recorded.quiz_id),
        GenerationMode::Mock => None,
    };

    Ok(HttpResponse::Ok().json(GenerateQuestionsResponse { questions, quiz_id }))
}
