use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize};

/// A generated quiz question in the shape the model is asked to produce.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Mcq,
    TrueFalse,
    ShortAnswer,
    FillBlank,
}

impl QuestionType {
    pub fn as_tag(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "mcq",
            QuestionType::TrueFalse => "true_false",
            QuestionType::ShortAnswer => "short_answer",
            QuestionType::FillBlank => "fill_blank",
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    /// Case-insensitive; `-`, `/` and whitespace count as `_`, so
    /// `Fill-in-the-blank` and `short answer` resolve like their snake_case tags.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let tag: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '-' | '/' | ' ' | '\t' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match tag.as_str() {
            "mcq" | "multiple_choice" | "multichoice" => Ok(QuestionType::Mcq),
            "true_false" | "truefalse" | "boolean" => Ok(QuestionType::TrueFalse),
            "short_answer" | "short" => Ok(QuestionType::ShortAnswer),
            "fill_blank" | "fill_in_the_blank" | "fill_in_blank" | "fill_in_the_blanks" => {
                Ok(QuestionType::FillBlank)
            }
            _ => Err(format!("unknown question type '{}'", raw)),
        }
    }
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Top-level payload returned by the model: `{"questions": [...]}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneratedQuestions {
    pub questions: Vec<Question>,
}

impl Answer {
    pub fn new(text: &str, is_correct: bool) -> Self {
        Self {
            text: text.to_string(),
            is_correct,
        }
    }
}
