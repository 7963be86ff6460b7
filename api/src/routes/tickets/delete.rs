use std::collections::HashMap;

use axum::Json;
use tracing::info;

use crate::error::ApiError;
use crate::response::MessageResponse;
use crate::routes::tickets::common::find_ticket;
use crate::state::AppState;

/// DELETE /api/v1/tickets?id={id}
///
/// Removes a ticket together with its conversation.
///
/// ### Responses
/// - `200 OK` → `{ "message": "Ticket deleted" }`
/// - `400 Bad Request` → missing `id`
/// - `404 Not Found` → no ticket with that id
pub async fn delete_ticket(
    app_state: &AppState,
    params: &HashMap<String, String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let ticket = find_ticket(app_state, params).await?;

    app_state.tickets().delete(&ticket).await?;
    info!(ticket_id = ticket.id, number = %ticket.number, "Ticket deleted");

    Ok(Json(MessageResponse::new("Ticket deleted")))
}
