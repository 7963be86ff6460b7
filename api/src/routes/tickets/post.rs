use std::net::IpAddr;

use axum::{Json, http::StatusCode};
use db::StoreError;
use db::store::NewTicket;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::routes::tickets::common::int_value;
use crate::state::AppState;

pub const TICKET_SOURCE: &str = "API";
const MISSING_FIELDS: &str = "Missing required fields: email, subject, message";

#[derive(Debug, Serialize)]
pub struct TicketCreatedResponse {
    pub message: String,
    pub id: i64,
    pub number: String,
}

/// Non-blank string field of the request body.
fn text(body: &Map<String, Value>, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_owned)
}

/// POST /api/v1/tickets
///
/// Opens a ticket on behalf of the requester identified by `email`.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Alice",
///   "email": "alice@example.com",
///   "subject": "Printer on fire",
///   "message": "Smoke everywhere",
///   "topic_id": 1
/// }
/// ```
/// `name` and `topic_id` are optional; `topic_id` may be a numeric string.
///
/// ### Responses
/// - `201 Created`
/// ```json
/// { "message": "Ticket created", "id": 7, "number": "482913" }
/// ```
/// - `422 Unprocessable Entity` → email, subject or message missing
/// - `500 Internal Server Error` → the ticket store rejected the ticket
/// ```json
/// { "error": "Failed to create ticket: Valid email address required" }
/// ```
pub async fn create_ticket(
    app_state: &AppState,
    client_ip: IpAddr,
    body: &[u8],
) -> Result<(StatusCode, Json<TicketCreatedResponse>), ApiError> {
    let missing = || ApiError::UnprocessableEntity(MISSING_FIELDS.into());

    let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
        return Err(missing());
    };

    let (Some(email), Some(subject), Some(message)) = (
        text(&fields, "email"),
        text(&fields, "subject"),
        text(&fields, "message"),
    ) else {
        return Err(missing());
    };

    let new_ticket = NewTicket {
        name: text(&fields, "name").unwrap_or_default(),
        email,
        subject,
        message,
        ip_address: client_ip.to_string(),
        source: TICKET_SOURCE.to_owned(),
        topic_id: fields
            .get("topic_id")
            .and_then(int_value)
            .filter(|id| *id != 0),
    };

    match app_state.tickets().create(new_ticket).await {
        Ok(ticket) => {
            info!(ticket_id = ticket.id, number = %ticket.number, ip = %client_ip, "Ticket created");
            Ok((
                StatusCode::CREATED,
                Json(TicketCreatedResponse {
                    message: "Ticket created".into(),
                    id: ticket.id,
                    number: ticket.number,
                }),
            ))
        }
        Err(StoreError::Validation(errors)) => {
            warn!(?errors, "Ticket rejected by store");
            Err(ApiError::Operation(format!(
                "Failed to create ticket: {}",
                errors.join(", ")
            )))
        }
        Err(err) => Err(err.into()),
    }
}
