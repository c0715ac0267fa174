pub mod model_service;
pub mod question_generator;
pub mod quiz_recorder;
pub mod quiz_service;
pub mod response_sanitizer;
