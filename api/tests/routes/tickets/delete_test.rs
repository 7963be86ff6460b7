#[cfg(test)]
mod tests {
    use crate::helpers::{FakeTickets, TestApp, TestAppBuilder, get_json, send, ticket};
    use axum::http::StatusCode;

    fn seeded() -> TestApp {
        TestAppBuilder::new()
            .tickets(FakeTickets::with(vec![
                ticket(1, "Printer on fire", 1, 1, "alice@example.com"),
                ticket(2, "VPN drops", 1, 1, "bob@example.com"),
            ]))
            .build()
    }

    #[tokio::test]
    async fn deletes_existing_ticket() {
        let app = seeded();

        let (status, body) = send(&app.router, "DELETE", "/api/v1/tickets?id=1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Ticket deleted");
        assert!(app.tickets.get(1).is_none());

        let (_, json) = get_json(&app.router, "/api/v1/tickets?id=1").await;
        assert_eq!(json["pagination"]["total"], 0);
    }

    #[tokio::test]
    async fn unknown_ticket_is_404() {
        let app = seeded();

        let (status, body) = send(&app.router, "DELETE", "/api/v1/tickets?id=999", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Ticket not found");
        assert_eq!(app.tickets.calls.mutations(), 0);
    }

    #[tokio::test]
    async fn missing_id_is_400() {
        let app = seeded();

        for uri in ["/api/v1/tickets", "/api/v1/tickets?id=", "/api/v1/tickets?id=0"] {
            let (status, body) = send(&app.router, "DELETE", uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], "Missing ticket ID");
        }
        assert_eq!(app.tickets.calls.total(), 0);
    }

    #[tokio::test]
    async fn non_numeric_id_is_404() {
        let app = seeded();

        let (status, _) = send(&app.router, "DELETE", "/api/v1/tickets?id=abc", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(app.tickets.get(1).is_some());
    }

    #[tokio::test]
    async fn id_with_trailing_garbage_uses_leading_digits() {
        let app = seeded();

        let (status, body) = send(&app.router, "DELETE", "/api/v1/tickets?id=2abc", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Ticket deleted");
        assert!(app.tickets.get(2).is_none());
        assert!(app.tickets.get(1).is_some());
    }
}
