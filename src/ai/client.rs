use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

const OPENAI_MODEL: &str = "gpt-3.5-turbo";
const MAX_TOKENS: u32 = 300;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat-completion client. Sends one user message per call and hands back the
/// first choice's text without interpreting it.
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_key: &str, api_url: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(AppError::MissingApiKey);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            api_url: api_url.to_string(),
        })
    }

    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: OPENAI_MODEL,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!(model = OPENAI_MODEL, prompt_chars = prompt.len(), "Requesting completion");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(AppError::OpenAiApi(format!("HTTP {}: {}", status, error_text)));
        }

        let chat_response: ChatResponse = response.json().await?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or(AppError::EmptyCompletion)?
            .message
            .content
            .unwrap_or_default();

        tracing::debug!(chars = content.len(), "Received completion");
        Ok(content)
    }

    pub fn model_version(&self) -> &'static str {
        OPENAI_MODEL
    }
}
