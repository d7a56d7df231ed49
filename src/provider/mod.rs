use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppError;

pub mod openai;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of a conversation. Order is significant: system first, then user
/// turns in the order the model must consider them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// The single seam to the external intelligence service. One request in, the
/// first completion's text out; every failure collapses to `AppError::Llm`.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn complete(&self, conversation: &[ChatMessage]) -> Result<String, AppError>;
}

pub type DynProvider = Arc<dyn Provider>;

pub fn make_provider(cfg: &Config) -> DynProvider {
    Arc::new(openai::OpenAiProvider::new(cfg))
}
