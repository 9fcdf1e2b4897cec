use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{chat_handler, health_handler};
use crate::state::AppState;

/// Build the relay router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the relay server until ctrl-c
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use glochat_providers::{ChatProvider, Message, ProviderError, ProviderResult};
    use std::sync::Arc;
    use tower::util::ServiceExt;

    struct StubProvider {
        reply: Result<String, String>,
    }

    #[async_trait]
    impl ChatProvider for StubProvider {
        async fn complete(&self, messages: Vec<Message>) -> ProviderResult<String> {
            // The relay must forward exactly system prompt + one user turn.
            assert_eq!(messages.len(), 2);
            assert_eq!(messages[0].role, "system");
            assert_eq!(messages[1].role, "user");
            match &self.reply {
                Ok(content) => Ok(content.clone()),
                Err(e) => Err(ProviderError::Api(e.clone())),
            }
        }

        fn default_model(&self) -> String {
            "stub".to_string()
        }
    }

    fn chat_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_chat_returns_completion_content() {
        let provider = Arc::new(StubProvider {
            reply: Ok("Hello from the assistant".to_string()),
        });
        let app = router(AppState::new(Some(provider)));

        let response = app
            .oneshot(chat_request(r#"{"message": "hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Hello from the assistant");
    }

    #[tokio::test]
    async fn test_missing_provider_is_a_generic_500() {
        let app = router(AppState::new(None));

        let response = app
            .oneshot(chat_request(r#"{"message": "hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], crate::handlers::GENERIC_ERROR);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_the_same_generic_500() {
        let provider = Arc::new(StubProvider {
            reply: Err("HTTP 503: upstream down".to_string()),
        });
        let app = router(AppState::new(Some(provider)));

        let response = app
            .oneshot(chat_request(r#"{"message": "hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], crate::handlers::GENERIC_ERROR);
    }

    #[tokio::test]
    async fn test_malformed_body_is_the_same_generic_500() {
        let provider = Arc::new(StubProvider {
            reply: Ok("unused".to_string()),
        });
        let app = router(AppState::new(Some(provider)));

        let response = app.oneshot(chat_request("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], crate::handlers::GENERIC_ERROR);
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = router(AppState::new(None));

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }
}
