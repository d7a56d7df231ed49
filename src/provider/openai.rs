use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::config::Config;
use crate::errors::AppError;
use super::ChatMessage;

/// Chat-completions client for any OpenAI-compatible endpoint. Sends exactly
/// one request per call; no retries.
pub struct OpenAiProvider {
    endpoint: String,
    api_key: String,
    model: String,
    client: Client,
    timeout_secs: u64,
}

impl OpenAiProvider {
    pub fn new(cfg: &Config) -> Self {
        Self {
            endpoint: cfg.llm_endpoint.clone(),
            api_key: cfg.llm_api_key.clone(),
            model: cfg.model.clone(),
            client: Client::new(),
            timeout_secs: cfg.timeout_secs,
        }
    }
}

#[async_trait]
impl super::Provider for OpenAiProvider {
    async fn complete(&self, conversation: &[ChatMessage]) -> Result<String, AppError> {
        let body = json!({
            "model": self.model,
            "messages": conversation,
            "temperature": 0.7,
        });

        tracing::debug!(model = %self.model, turns = conversation.len(), "sending chat completion request");

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("request to LLM endpoint failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| AppError::Llm(format!("failed to read LLM response body: {e}")))?;

        if !status.is_success() {
            return Err(AppError::Llm(format!("LLM API error ({status}): {text}")));
        }

        // Minimal structs to parse the chat response
        #[derive(Deserialize)]
        struct Message {
            content: String,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: Message,
        }
        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| AppError::Llm(format!("failed to parse LLM response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::Llm("LLM response contained no choices".into()))
    }
}
