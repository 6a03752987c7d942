use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{detokenize_handler, health_handler, tokenize_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/tokenize", post(tokenize_handler))
            .route("/detokenize", post(detokenize_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;
    use veil_core::{StorageError, Token, Tokenizer, TokenizerError};
    use veil_generator::RandomGenerator;
    use veil_storage::InMemoryRepository;
    use veil_tokenizer::TokenizerService;

    /// Fails every call, and panics if called with an empty batch.
    struct FailingTokenizer(TokenizerError);

    #[async_trait]
    impl Tokenizer for FailingTokenizer {
        async fn issue(&self, identifiers: &[String]) -> Result<Vec<Token>, TokenizerError> {
            assert!(!identifiers.is_empty());
            Err(self.0.clone())
        }

        async fn reverse(&self, tokens: &[String]) -> Result<Vec<Option<String>>, TokenizerError> {
            assert!(!tokens.is_empty());
            Err(self.0.clone())
        }
    }

    fn router() -> Router {
        let service = TokenizerService::new(InMemoryRepository::new(), RandomGenerator::default());
        App::router(AppState::new(Arc::new(service)))
    }

    fn failing_router(error: TokenizerError) -> Router {
        App::router(AppState::new(Arc::new(FailingTokenizer(error))))
    }

    fn post_json(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn tokenize_then_detokenize() {
        let router = router();

        let (status, body) = send(
            router.clone(),
            post_json("/tokenize", r#"["4111-1111-1111-1111"]"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let tokens: Vec<String> = serde_json::from_str(&body).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].len(), 32);

        let request = Request::builder()
            .method("POST")
            .uri("/detokenize")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&tokens).unwrap()))
            .unwrap();
        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"["4111-1111-1111-1111"]"#);
    }

    #[tokio::test]
    async fn tokenize_is_idempotent_over_http() {
        let router = router();

        let (_, first) = send(router.clone(), post_json("/tokenize", r#"["acct-1"]"#)).await;
        let (_, second) = send(router, post_json("/tokenize", r#"["acct-1"]"#)).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn detokenize_keeps_null_slots() {
        let (status, body) = send(
            router(),
            post_json("/detokenize", r#"["nonexistent-token", "other"]"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[null,null]");
    }

    #[tokio::test]
    async fn empty_list_returns_empty_list() {
        let error = TokenizerError::IssuanceExhausted { attempts: 5 };

        for uri in ["/tokenize", "/detokenize"] {
            let (status, body) = send(failing_router(error.clone()), post_json(uri, "[]")).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, "[]");
        }
    }

    #[tokio::test]
    async fn absent_body_returns_empty_list() {
        let error = TokenizerError::IssuanceExhausted { attempts: 5 };

        for uri in ["/tokenize", "/detokenize"] {
            let request = Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::empty())
                .unwrap();
            let (status, body) = send(failing_router(error.clone()), request).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, "[]");
        }
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let (status, body) = send(router(), post_json("/tokenize", r#"{"not":"a list"}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Required request body is missing or incorrect");

        let (status, _) = send(router(), post_json("/detokenize", "[1, 2, 3]")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn exhaustion_is_internal_error() {
        let router = failing_router(TokenizerError::IssuanceExhausted { attempts: 5 });

        let (status, body) = send(router, post_json("/tokenize", r#"["4111-1111-1111-1111"]"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            "An error occurred: Failed to generate unique token after 5 attempts"
        );
    }

    #[tokio::test]
    async fn storage_failure_on_detokenize_is_internal_error() {
        let router = failing_router(TokenizerError::Storage(StorageError::Unavailable(
            "db down".to_string(),
        )));

        let (status, body) = send(router, post_json("/detokenize", r#"["token123"]"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            "An error occurred: storage error: storage backend unavailable: db down"
        );
    }

    #[tokio::test]
    async fn server_keeps_serving_after_failure() {
        let router = failing_router(TokenizerError::IssuanceExhausted { attempts: 5 });

        let (first, _) = send(router.clone(), post_json("/tokenize", r#"["x"]"#)).await;
        let (second, _) = send(router, post_json("/tokenize", "[]")).await;

        assert_eq!(first, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(second, StatusCode::OK);
    }
}
