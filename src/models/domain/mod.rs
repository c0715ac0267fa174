pub mod question;
pub mod quiz;
pub use question::{Answer, GeneratedQuestions, Question, QuestionType};
pub use quiz::{AnswerRecord, QuestionRecord, QuizRecord};
