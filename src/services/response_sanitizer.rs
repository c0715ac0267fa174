//! Cleans up model output before it is parsed as a question payload.
//!
//! Models asked for JSON still occasionally wrap it in a markdown fence or
//! return a payload whose newlines arrive as literal `\n` sequences.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    errors::{AppError, AppResult},
    models::domain::GeneratedQuestions,
};

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```[A-Za-z0-9_-]*\s*\n?(.*?)\s*```$").expect("CODE_FENCE is a valid regex")
});

const PARSE_FAILURE: &str = "Failed to parse AI-generated questions";

/// Trim, drop a surrounding code fence, then turn literal `\n`, `\r`, `\t`
/// escapes into the characters they name.
pub fn sanitize_model_output(raw: &str) -> String {
    unescape_control_sequences(&strip_code_fence(raw))
}

fn strip_code_fence(raw: &str) -> String {
    let trimmed = raw.trim();
    match CODE_FENCE.captures(trimmed).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str().trim().to_string(),
        None => trimmed.to_string(),
    }
}

fn unescape_control_sequences(text: &str) -> String {
    text.replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
}

/// Parses the model reply into questions. Any failure, including a payload
/// without a `questions` array, is reported as a malformed response.
pub fn parse_generated_questions(raw: &str) -> AppResult<GeneratedQuestions> {
    let sanitized = sanitize_model_output(raw);

    // Unescaping can break JSON whose string values legitimately contain `\n`,
    // so the fence-stripped original is tried as well.
    let value = serde_json::from_str::<serde_json::Value>(&sanitized)
        .or_else(|_| serde_json::from_str::<serde_json::Value>(&strip_code_fence(raw)))
        .map_err(|e| {
            log::error!("Model reply is not valid JSON: {}", e);
            AppError::MalformedResponse(PARSE_FAILURE.to_string())
        })?;

    // A double-encoded payload arrives as one JSON string holding the object.
    let value = match value {
        serde_json::Value::String(inner) => {
            serde_json::from_str::<serde_json::Value>(&inner).map_err(|e| {
                log::error!("Model reply is a JSON string without a JSON object: {}", e);
                AppError::MalformedResponse(PARSE_FAILURE.to_string())
            })?
        }
        other => other,
    };

    serde_json::from_value::<GeneratedQuestions>(value).map_err(|e| {
        log::error!("Model reply does not match the question schema: {}", e);
        AppError::MalformedResponse(PARSE_FAILURE.to_string())
    })
}
