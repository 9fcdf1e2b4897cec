use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use glochat_providers::Message;

use crate::state::AppState;

/// Fixed persona forwarded with every upstream call
pub const SYSTEM_PROMPT: &str = "You are GloGPT, a helpful and knowledgeable AI assistant.";

/// The one generic error message callers ever see
pub const GENERIC_ERROR: &str = "Failed to process your request";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn generic_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: GENERIC_ERROR.to_string(),
        }),
    )
        .into_response()
}

/// Handle `POST /api/chat`
///
/// One upstream round trip per request: the fixed system prompt plus the
/// submitted message. No history is forwarded; each call is stateless
/// from the provider's perspective. The body is parsed by hand so a
/// malformed request falls into the same generic failure as everything
/// else.
pub async fn chat_handler(State(state): State<AppState>, body: String) -> Response {
    let payload: ChatRequest = match serde_json::from_str(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("Malformed chat request body: {}", e);
            return generic_failure();
        }
    };

    let Some(provider) = state.provider else {
        tracing::error!("Chat request received but no provider is configured");
        return generic_failure();
    };

    let messages = vec![Message::system(SYSTEM_PROMPT), Message::user(payload.message)];

    match provider.complete(messages).await {
        Ok(content) => Json(ChatResponse { message: content }).into_response(),
        Err(e) => {
            tracing::error!("Upstream completion failed: {}", e);
            generic_failure()
        }
    }
}

/// Handle `GET /api/health`
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
