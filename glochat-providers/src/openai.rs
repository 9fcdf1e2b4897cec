//! OpenAI-compatible HTTP client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::base::{ChatProvider, Message, ProviderError, ProviderResult};

/// Chat-completion API request format
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f64,
}

/// Chat-completion API response format
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completion endpoint
pub struct OpenAiClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl OpenAiClient {
    /// Create a new client
    ///
    /// An empty API key is a configuration error; the relay collapses it
    /// into its generic failure response.
    pub fn new(
        api_key: Option<String>,
        api_base: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
        temperature: f64,
    ) -> ProviderResult<Self> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProviderError::Config("API key not configured".to_string()))?;

        let api_base = api_base.into();
        let api_base = api_base.trim_end_matches('/').to_string();

        Ok(Self {
            client: Client::builder()
                .http1_only() // Force HTTP/1.1 to avoid issues with some local servers
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_base,
            api_key,
            model: model.into(),
            max_tokens,
            temperature,
        })
    }

    fn parse_response(&self, response: ChatCompletionResponse) -> ProviderResult<String> {
        let choice = response
            .choices
            .first()
            .ok_or_else(|| ProviderError::InvalidResponse("No choices in response".to_string()))?;

        choice.message.content.clone().ok_or_else(|| {
            ProviderError::InvalidResponse("First choice has no content".to_string())
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAiClient {
    async fn complete(&self, messages: Vec<Message>) -> ProviderResult<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let url = format!("{}/chat/completions", self.api_base);
        debug!("Sending chat request to {} with model {}", url, self.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        let response_data: ChatCompletionResponse = response.json().await?;
        self.parse_response(response_data)
    }

    fn default_model(&self) -> String {
        self.model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_base: &str) -> OpenAiClient {
        OpenAiClient::new(
            Some("test-key".to_string()),
            api_base,
            "grok-beta",
            1024,
            0.7,
        )
        .unwrap()
    }

    #[test]
    fn test_missing_key_is_a_config_error() {
        let result = OpenAiClient::new(None, "https://api.x.ai/v1", "grok-beta", 1024, 0.7);
        assert!(matches!(result, Err(ProviderError::Config(_))));

        let result = OpenAiClient::new(
            Some("  ".to_string()),
            "https://api.x.ai/v1",
            "grok-beta",
            1024,
            0.7,
        );
        assert!(matches!(result, Err(ProviderError::Config(_))));
    }

    #[tokio::test]
    async fn test_complete_extracts_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [{"message": {"role": "assistant", "content": "Hello!"}}]}"#,
            )
            .create_async()
            .await;

        let client = client(&server.url());
        let reply = client
            .complete(vec![Message::system("persona"), Message::user("hi")])
            .await
            .unwrap();

        assert_eq!(reply, "Hello!");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upstream_error_status_is_an_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let client = client(&server.url());
        let err = client.complete(vec![Message::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ProviderError::Api(_)));
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_empty_choices_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let client = client(&server.url());
        let err = client.complete(vec![Message::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_null_content_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#)
            .create_async()
            .await;

        let client = client(&server.url());
        let err = client.complete(vec![Message::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }
}
