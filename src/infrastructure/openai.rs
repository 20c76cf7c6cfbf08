//! OpenAI-compatible chat completions client

use crate::config::AiConfig;
use crate::infrastructure::traits::{CompletionRequest, GenerationError, TextGenerator};
use async_trait::async_trait;
use di::{inject, injectable};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub struct OpenAiTextGenerator {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

#[injectable(TextGenerator)]
impl OpenAiTextGenerator {
    #[inject]
    pub fn create() -> OpenAiTextGenerator {
        OpenAiTextGenerator::new(AiConfig::from_env())
    }
}

impl OpenAiTextGenerator {
    pub fn new(config: AiConfig) -> OpenAiTextGenerator {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("failed to build AI HTTP client with timeout, using defaults: {e}");
                reqwest::Client::new()
            });

        OpenAiTextGenerator {
            client,
            api_key: config.api_key.filter(|key| !key.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::NotConfigured)?;

        let body = ChatCompletionBody {
            model: &request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!("requesting completion from model {}", request.model);

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}
