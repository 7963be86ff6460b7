//! Full stack: router → SeaORM repositories → migrated in-memory SQLite.

#[cfg(test)]
mod tests {
    use crate::helpers::{API_KEY, raw, send};
    use api::routes::app;
    use api::state::AppState;
    use axum::{
        Router,
        body::Body,
        extract::connect_info::MockConnectInfo,
        http::{Request, StatusCode},
    };
    use db::models::thread_entries::ThreadKind;
    use db::test_utils::{insert_api_key, insert_entry, insert_ticket, insert_user, setup_test_db};
    use sea_orm::DatabaseConnection;
    use serde_json::json;
    use std::net::SocketAddr;

    async fn make_app(bound_ip: Option<&str>) -> (Router, DatabaseConnection) {
        let db = setup_test_db().await;
        insert_api_key(&db, API_KEY, bound_ip, true).await.unwrap();
        insert_api_key(&db, "disabled-key", None, false).await.unwrap();

        let router = app(AppState::from_db(db.clone()))
            .layer(MockConnectInfo(SocketAddr::from(([10, 0, 0, 5], 41_000))));
        (router, db)
    }

    #[tokio::test]
    async fn create_then_list_by_email() {
        let (router, _db) = make_app(None).await;

        let (status, created) = send(
            &router,
            "POST",
            "/api/v1/tickets",
            Some(json!({
                "email": "dana@example.com",
                "subject": "Cannot print",
                "message": "The printer shows E42",
                "topic_id": 2
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["number"].as_str().unwrap().len(), 6);

        let (status, json) =
            send(&router, "GET", "/api/v1/tickets?email=dana%40example.com", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["pagination"]["total"], 1);

        let ticket = &json["tickets"][0];
        assert_eq!(ticket["id"], created["id"]);
        assert_eq!(ticket["status"], "Open");
        assert_eq!(ticket["priority_id"], 3);
        assert_eq!(ticket["topic_id"], 2);
        assert_eq!(ticket["user_name"], "dana");
        assert_eq!(ticket["responses"][0]["body"], "The printer shows E42");
        assert_eq!(ticket["responses"][0]["user_email"], "dana@example.com");
    }

    #[tokio::test]
    async fn repository_rejection_surfaces_as_500() {
        let (router, _db) = make_app(None).await;

        let (status, body) = send(
            &router,
            "POST",
            "/api/v1/tickets",
            Some(json!({ "email": "not-an-email", "subject": "S", "message": "M" })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to create ticket: Valid email address required");
    }

    #[tokio::test]
    async fn update_and_delete_round_trip() {
        let (router, db) = make_app(Some("10.0.0.5")).await;
        let user = insert_user(&db, "Erin", "erin@example.com").await.unwrap();
        let ticket = insert_ticket(&db, "300001", "Laptop", user.id, 1, 1, None).await.unwrap();
        insert_entry(&db, ticket.id, Some(user.id), ThreadKind::Message, "Screen flickers", 30).await.unwrap();
        insert_entry(&db, ticket.id, None, ThreadKind::Note, "Check warranty", 20).await.unwrap();

        let uri = format!("/api/v1/tickets?id={}", ticket.id);

        let (status, _) = send(&router, "PATCH", &uri, Some(json!({ "status_id": 3, "topic_id": 1 }))).await;
        assert_eq!(status, StatusCode::OK);

        let (_, json) = send(&router, "GET", &uri, None).await;
        assert_eq!(json["tickets"][0]["status"], "Closed");
        assert_eq!(json["tickets"][0]["topic_id"], 1);
        assert_eq!(json["tickets"][0]["responses"].as_array().unwrap().len(), 1);

        let (status, body) = send(&router, "PATCH", &uri, Some(json!({ "topic_id": 999 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("999"));

        let (status, _) = send(&router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn disabled_key_and_wrong_address_are_forbidden() {
        let (router, _db) = make_app(Some("10.0.0.9")).await;

        let req = Request::builder()
            .method("GET")
            .uri("/api/v1/tickets")
            .header("x-api-key", "disabled-key")
            .body(Body::empty())
            .unwrap();
        let (status, body) = raw(&router, req).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Invalid API key");

        let (status, body) = send(&router, "GET", "/api/v1/tickets", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Unauthorized IP");
    }
}
