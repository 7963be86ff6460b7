#[cfg(test)]
mod tests {
    use crate::helpers::{FakeTickets, TestAppBuilder, make_test_app, raw, send, ticket};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };

    #[tokio::test]
    async fn head_is_405_without_store_interaction() {
        let app = TestAppBuilder::new()
            .tickets(FakeTickets::with(vec![ticket(1, "A", 1, 1, "a@example.com")]))
            .build();

        let req = Request::builder()
            .method("HEAD")
            .uri("/api/v1/tickets")
            .header("x-api-key", "test-key")
            .body(Body::empty())
            .unwrap();
        let response = tower::ServiceExt::oneshot(app.router.clone(), req).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(app.tickets.calls.total(), 0);
        assert_eq!(app.threads.calls(), 0);
    }

    #[tokio::test]
    async fn other_methods_are_405_with_error_body() {
        let app = make_test_app();

        for method in ["OPTIONS", "TRACE", "PROPFIND"] {
            let (status, body) = send(&app.router, method, "/api/v1/tickets", None).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
            assert_eq!(body["error"], "Method not allowed");
        }
        assert_eq!(app.tickets.calls.total(), 0);
    }

    #[tokio::test]
    async fn unsupported_method_still_requires_a_key() {
        let app = make_test_app();

        let req = Request::builder()
            .method("TRACE")
            .uri("/api/v1/tickets")
            .body(Body::empty())
            .unwrap();
        let (status, _) = raw(&app.router, req).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn responses_are_json() {
        let app = make_test_app();

        let req = Request::builder()
            .method("DELETE")
            .uri("/api/v1/tickets")
            .header("x-api-key", "test-key")
            .body(Body::empty())
            .unwrap();
        let response = tower::ServiceExt::oneshot(app.router.clone(), req).await.unwrap();

        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn oversized_body_is_413_with_json_error() {
        let app = make_test_app();

        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/tickets")
            .header("x-api-key", "test-key")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(vec![b' '; 2 * 1024 * 1024 + 1]))
            .unwrap();
        let response = tower::ServiceExt::oneshot(app.router.clone(), req).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].is_string());
        assert_eq!(app.tickets.calls.total(), 0);
    }
}
