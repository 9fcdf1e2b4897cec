//! HTTP client for the relay endpoint

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use glochat_core::session::ChatTransport;
use glochat_core::{Error, Result};

/// Client for the relay's `/api/chat` route
pub struct ApiClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ChatReply {
    message: String,
}

#[derive(Deserialize)]
struct ErrorReply {
    error: String,
}

impl ApiClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.unwrap_or_else(|| "http://127.0.0.1:3000/api".to_string()),
        }
    }

    /// Send one message and return the assistant reply text
    pub async fn chat(&self, message: &str) -> Result<String> {
        let url = format!("{}/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = match response.json::<ErrorReply>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            return Err(Error::Transport(detail));
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(reply.message)
    }

    /// Whether the relay answers its health route
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl ChatTransport for ApiClient {
    async fn send(&self, message: &str) -> Result<String> {
        self.chat(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chat_parses_reply() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Hi there!"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(Some(server.url()));
        assert_eq!(client.chat("hello").await.unwrap(), "Hi there!");
    }

    #[tokio::test]
    async fn test_relay_error_body_becomes_transport_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Failed to process your request"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(Some(server.url()));
        let err = client.chat("hello").await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(err.to_string().contains("Failed to process your request"));
    }

    #[tokio::test]
    async fn test_health_is_false_when_unreachable() {
        let client = ApiClient::new(Some("http://127.0.0.1:1/api".to_string()));
        assert!(!client.health().await);
    }
}
