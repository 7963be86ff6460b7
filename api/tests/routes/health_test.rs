#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, raw};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };

    #[tokio::test]
    async fn health_needs_no_api_key() {
        let app = make_test_app();

        let req = Request::builder()
            .method("GET")
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();

        let (status, json) = raw(&app.router, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(app.api_keys.lookups(), 0);
    }
}
