//! Axum router configuration with middleware.
//!
//! Routes: `POST /api/chat`, `GET /health`.
//! Middleware: permissive CORS, request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use chatrelay_core::llm::provider::LlmProvider;

use crate::http::HttpState;
use crate::http::handlers;

/// Build the relay router.
pub fn build_router<P: LlmProvider + 'static>(state: HttpState<P>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(handlers::relay::relay_chat::<P>))
        .route("/health", get(handlers::health::health::<P>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use chatrelay_core::relay::service::CompletionRelay;
    use chatrelay_types::llm::{CompletionRequest, CompletionResponse, LlmError};
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    // --- Mock provider ---

    struct MockProvider {
        result: fn() -> Result<CompletionResponse, LlmError>,
        calls: Arc<AtomicUsize>,
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            _api_key: &SecretString,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn router_with(
        key: Option<&str>,
        result: fn() -> Result<CompletionResponse, LlmError>,
    ) -> (Router, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = MockProvider {
            result,
            calls: calls.clone(),
        };
        let relay = CompletionRelay::new(provider, key.map(SecretString::from));
        (build_router(HttpState::new(relay)), calls)
    }

    fn reply_ok() -> Result<CompletionResponse, LlmError> {
        Ok(CompletionResponse {
            id: Some("gen-1".to_string()),
            content: Some("Hello there!".to_string()),
            model: Some("anthropic/claude-3-haiku".to_string()),
        })
    }

    fn upstream(status: u16) -> Result<CompletionResponse, LlmError> {
        Err(LlmError::Upstream {
            status,
            message: "nope".to_string(),
        })
    }

    fn chat_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_relay_success() {
        let (router, calls) = router_with(Some("sk-or-test"), reply_ok);
        let (status, body) = send(router, chat_request(r#"{"message":"Hi","chatId":"c1"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "success": true, "response": "Hello there!", "model": "Claude 3 Haiku" })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_upstream_call() {
        let (router, calls) = router_with(None, reply_ok);
        let (status, body) = send(router, chat_request(r#"{"message":"Hi","chatId":"c1"}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "OpenRouter API key not configured. Please add OPENROUTER_API_KEY to your environment variables."
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_upstream_statuses_are_mapped() {
        fn rate_limited() -> Result<CompletionResponse, LlmError> {
            upstream(429)
        }
        fn unauthorized() -> Result<CompletionResponse, LlmError> {
            upstream(401)
        }
        fn no_credits() -> Result<CompletionResponse, LlmError> {
            upstream(402)
        }
        fn overloaded() -> Result<CompletionResponse, LlmError> {
            upstream(503)
        }

        let cases: [(fn() -> Result<CompletionResponse, LlmError>, StatusCode, &str); 4] = [
            (rate_limited, StatusCode::TOO_MANY_REQUESTS, "OpenRouter API rate limit exceeded. Please try again later."),
            (unauthorized, StatusCode::UNAUTHORIZED, "Invalid OpenRouter API key. Please check your OPENROUTER_API_KEY environment variable."),
            (no_credits, StatusCode::PAYMENT_REQUIRED, "OpenRouter account has insufficient credits. Please add credits to your account."),
            (overloaded, StatusCode::INTERNAL_SERVER_ERROR, "Failed to get AI response. Please try again."),
        ];

        for (result, expected_status, expected_error) in cases {
            let (router, _) = router_with(Some("sk-or-test"), result);
            let (status, body) =
                send(router, chat_request(r#"{"message":"Hi","chatId":"c1"}"#)).await;
            assert_eq!(status, expected_status);
            assert_eq!(body, json!({ "error": expected_error }));
        }
    }

    #[tokio::test]
    async fn test_unparseable_body_is_generic_failure() {
        let (router, calls) = router_with(Some("sk-or-test"), reply_ok);
        let (status, body) = send(router, chat_request("{not json")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to get AI response. Please try again.");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_body_without_content_type_is_relayed() {
        let (router, calls) = router_with(Some("sk-or-test"), reply_ok);
        let request = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .body(Body::from(r#"{"message":"Hi","chatId":"c1"}"#))
            .unwrap();
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Hello there!");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_chat_id_is_optional() {
        let (router, calls) = router_with(Some("sk-or-test"), reply_ok);
        let (status, body) = send(router, chat_request(r#"{"message":"Hi"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_key_wins_over_incomplete_body() {
        for raw in [r#"{"message":"Hi"}"#, "{}"] {
            let (router, calls) = router_with(None, reply_ok);
            let (status, body) = send(router, chat_request(raw)).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                body["error"],
                "OpenRouter API key not configured. Please add OPENROUTER_API_KEY to your environment variables."
            );
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_missing_message_is_generic_failure() {
        let (router, calls) = router_with(Some("sk-or-test"), reply_ok);
        let (status, body) = send(router, chat_request(r#"{"chatId":"c1"}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to get AI response. Please try again.");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_identical_requests_are_not_cached() {
        let (router, calls) = router_with(Some("sk-or-test"), reply_ok);
        for _ in 0..2 {
            let (status, _) =
                send(router.clone(), chat_request(r#"{"message":"Hi","chatId":"c1"}"#)).await;
            assert_eq!(status, StatusCode::OK);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_health() {
        let (router, _) = router_with(None, reply_ok);
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["provider"], "mock");
        assert_eq!(body["credential_configured"], false);
    }
}
