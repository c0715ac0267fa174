use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

const APP_TITLE: &str = "QuizGenius AI";
const UPSTREAM_FAILURE: &str = "Failed to call OpenRouter API";

/// Seam to the hosted chat-completion API. Returns the raw text of the first
/// choice; parsing it is the caller's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    async fn complete_json(&self, system_prompt: &str, user_prompt: &str) -> AppResult<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenRouter (OpenAI-compatible) chat completions over reqwest.
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: Option<SecretString>,
    api_base: String,
    model: String,
    referer: String,
}

impl OpenRouterClient {
    pub fn new(config: &Config) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    pub fn with_http_client(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_key: config.openrouter_api_key.clone(),
            api_base: config.openrouter_api_base.trim_end_matches('/').to_string(),
            model: config.openrouter_model.clone(),
            referer: config.app_url.clone(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

#[async_trait]
impl ChatCompletionClient for OpenRouterClient {
    async fn complete_json(&self, system_prompt: &str, user_prompt: &str) -> AppResult<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| AppError::ConfigurationError("API key not configured".to_string()))?;

        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        log::info!("Requesting quiz questions from model {}", self.model);

        let response = self
            .http
            .post(self.completions_url())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", api_key.expose_secret()))
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", APP_TITLE)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read response body".to_string());
            log::error!("OpenRouter API error ({}): {}", status, detail);
            return Err(AppError::UpstreamError(UPSTREAM_FAILURE.to_string()));
        }

        let payload: ChatResponse = response.json().await.map_err(|e| {
            log::error!("OpenRouter returned an unreadable completion: {}", e);
            AppError::MalformedResponse("Failed to parse AI-generated questions".to_string())
        })?;

        let content = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                log::error!("OpenRouter completion contained no message content");
                AppError::MalformedResponse("Failed to parse AI-generated questions".to_string())
            })?;

        log::debug!("Model reply received ({} bytes)", content.len());
        Ok(content)
    }
}
