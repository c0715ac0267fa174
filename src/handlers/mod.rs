pub mod generate_handler;
pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

use crate::errors::AppError;

pub use generate_handler::generate_questions;
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use quiz_handler::{get_quiz, list_quizzes};

/// Registers every route plus extractor configs that report bad input as 400 JSON errors.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .service(generate_questions)
    .service(list_quizzes)
    .service(get_quiz)
    .service(health_check)
    .service(health_check_live)
    .service(health_check_ready);
}
