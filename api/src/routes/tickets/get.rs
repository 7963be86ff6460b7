use std::collections::HashMap;

use axum::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::routes::tickets::common::{Page, TicketView, filter_from_params};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: u64,
    pub pages: u64,
}

#[derive(Debug, Serialize)]
pub struct TicketListResponse {
    pub tickets: Vec<TicketView>,
    pub pagination: Pagination,
}

/// GET /api/v1/tickets
///
/// Lists tickets matching every supplied filter, one page at a time, each with
/// its conversation in chronological order.
///
/// ### Query parameters
/// - `page` (default `1`, min `1`)
/// - `per_page` (default `20`, clamped to `1..=100`)
/// - `id`, `status_id`, `dept_id`, `topic_id` → exact match
/// - `q` → subject contains
/// - `email` → requester email
///
/// Empty values and `0` are ignored.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "tickets": [
///     {
///       "id": 7, "number": "482913", "subject": "Printer on fire",
///       "status": "Open", "status_id": 1, "dept_id": 1, "priority_id": 2, "topic_id": null,
///       "created": "2025-03-01T09:30:00+00:00", "updated": "2025-03-01T09:30:00+00:00",
///       "user_email": "alice@example.com", "user_name": "Alice",
///       "responses": [
///         { "id": 11, "created": "2025-03-01T09:30:00+00:00", "body": "Help",
///           "user_id": 3, "user_name": "Alice", "user_email": "alice@example.com" }
///       ]
///     }
///   ],
///   "pagination": { "page": 1, "per_page": 20, "total": 1, "pages": 1 }
/// }
/// ```
pub async fn list_tickets(
    app_state: &AppState,
    params: &HashMap<String, String>,
) -> Result<Json<TicketListResponse>, ApiError> {
    let page = Page::from_params(params);
    let filter = filter_from_params(params);

    let total = app_state.tickets().count(&filter).await?;
    let found = app_state
        .tickets()
        .find_page(&filter, page.limit(), page.offset())
        .await?;

    let mut tickets = Vec::with_capacity(found.len());
    for ticket in found {
        let entries = app_state.threads().entries(&ticket).await?;
        tickets.push(TicketView::new(ticket, entries));
    }

    Ok(Json(TicketListResponse {
        tickets,
        pagination: Pagination {
            page: page.page,
            per_page: page.per_page,
            total,
            pages: page.pages(total),
        },
    }))
}
