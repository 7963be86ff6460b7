use std::collections::HashMap;

use axum::Json;
use db::StoreError;
use serde_json::Value;
use tracing::info;

use crate::error::ApiError;
use crate::response::MessageResponse;
use crate::routes::tickets::common::{TicketField, find_ticket, int_value};
use crate::state::AppState;

/// PUT|PATCH /api/v1/tickets?id={id}
///
/// Changes the status and/or help topic of a ticket. Other body fields are ignored,
/// and a `null` value leaves the field untouched. The ticket is only written when
/// at least one recognized field is present.
///
/// ### Request Body
/// ```json
/// { "status_id": 3, "topic_id": 2 }
/// ```
///
/// ### Responses
/// - `200 OK` → `{ "message": "Ticket updated" }`
/// - `400 Bad Request` → missing `id`, body not a non-empty JSON object, a
///   non-integer field value, or an unknown status/topic
/// - `404 Not Found` → no ticket with that id
pub async fn update_ticket(
    app_state: &AppState,
    params: &HashMap<String, String>,
    body: &[u8],
) -> Result<Json<MessageResponse>, ApiError> {
    let mut ticket = find_ticket(app_state, params).await?;

    let fields = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) if !fields.is_empty() => fields,
        _ => return Err(ApiError::BadRequest("Invalid JSON body".into())),
    };

    let mut changed = Vec::new();
    for field in TicketField::ALL {
        let Some(value) = fields.get(field.key()).filter(|v| !v.is_null()) else {
            continue;
        };
        let value = int_value(value)
            .ok_or_else(|| ApiError::BadRequest(format!("Invalid value for {}", field.key())))?;
        field.apply(&mut ticket, value);
        changed.push(field.key());
    }

    if !changed.is_empty() {
        match app_state.tickets().save(&ticket).await {
            Ok(()) => info!(ticket_id = ticket.id, ?changed, "Ticket updated"),
            Err(StoreError::Invalid(reason)) => return Err(ApiError::BadRequest(reason)),
            Err(err) => return Err(err.into()),
        }
    }

    Ok(Json(MessageResponse::new("Ticket updated")))
}
