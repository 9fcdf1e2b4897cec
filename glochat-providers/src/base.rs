//! Base trait for chat-completion providers

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for provider operations
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// A message in the upstream wire format
///
/// Roles are strings here because the wire format also carries "system",
/// which the client-side data model never stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Trait for chat-completion providers
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send one chat-completion request and return the first choice's content
    async fn complete(&self, messages: Vec<Message>) -> ProviderResult<String>;

    /// Get the default model for this provider
    fn default_model(&self) -> String;
}
