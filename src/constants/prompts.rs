use crate::models::domain::QuestionType;

pub const QUIZ_SYSTEM_PROMPT: &str = "You are an expert educator and quiz creator. Generate high-quality quiz questions based on the provided content. Always return valid JSON.";

const QUIZ_RESPONSE_SHAPE: &str = r#"{
  "questions": [
    {
      "question": "Question text here",
      "type": "mcq",
      "answers": [
        { "text": "Answer option 1", "isCorrect": false },
        { "text": "Answer option 2", "isCorrect": true },
        { "text": "Answer option 3", "isCorrect": false },
        { "text": "Answer option 4", "isCorrect": false }
      ],
      "explanation": "Explanation of the correct answer"
    }
  ]
}"#;

/// User prompt for one generation call. The content is embedded verbatim.
pub fn quiz_generation_prompt(
    content: &str,
    question_count: u32,
    question_types: &[QuestionType],
) -> String {
    let types = question_types
        .iter()
        .map(QuestionType::as_tag)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Generate {question_count} quiz questions based on the following content.
Content: {content}

Question types to include: {types}

Format your response as a JSON object with the following structure:
{QUIZ_RESPONSE_SHAPE}

For true/false questions, provide only two answer options: true and false.
For short answer questions, provide the correct answer in the first position of the answers array.
For fill-in-the-blank questions, use the format \"This is a _____ in the text\" and provide the correct word(s) as the answer.

Make sure the questions are diverse, challenging but fair, and directly related to the content provided.

IMPORTANT: Ensure your response is valid JSON. Do not include any markdown formatting, code blocks, or extra text outside the JSON object."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_count_types_and_content() {
        let prompt = quiz_generation_prompt(
            "The mitochondria is the powerhouse of the cell.",
            7,
            &[QuestionType::Mcq, QuestionType::FillBlank],
        );

        assert!(prompt.starts_with("Generate 7 quiz questions"));
        assert!(prompt.contains("Content: The mitochondria is the powerhouse of the cell."));
        assert!(prompt.contains("Question types to include: mcq, fill_blank"));
        assert!(prompt.contains("\"questions\": ["));
        assert!(prompt.contains("_____"));
    }

    #[test]
    fn prompt_keeps_braces_in_content_verbatim() {
        let prompt = quiz_generation_prompt("fn main() { println!(\"{}\", 1); }", 1, &[QuestionType::ShortAnswer]);
        assert!(prompt.contains("fn main() { println!(\"{}\", 1); }"));
    }
}
