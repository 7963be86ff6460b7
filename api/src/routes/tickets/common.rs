//! Shared request parsing and response projections for the ticket resource.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use db::store::{ThreadEntry, Ticket, TicketFilter};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;

/// Query parameter value, treating empty strings and `"0"` as absent.
pub fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty() && *value != "0")
}

/// Numeric query parameter. The leading integer of the value is used (`5abc` is `5`);
/// a value without one becomes `0`.
pub fn int_param(params: &HashMap<String, String>, key: &str) -> Option<i64> {
    param(params, key).map(leading_int)
}

/// Integer prefix of `raw` after leading whitespace and an optional sign.
/// Saturates at the `i64` bounds.
fn leading_int(raw: &str) -> i64 {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| i64::from(b - b'0'))
        .fold(0i64, |acc, digit| {
            let acc = acc.saturating_mul(10);
            if negative {
                acc.saturating_sub(digit)
            } else {
                acc.saturating_add(digit)
            }
        })
}

/// Integer carried by a JSON value, either as a number or a numeric string.
pub fn int_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Effective pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub per_page: i64,
}

impl Page {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let parse = |key: &str| params.get(key).and_then(|v| v.trim().parse::<i64>().ok());

        Self {
            page: parse("page").unwrap_or(DEFAULT_PAGE).max(1),
            per_page: parse("per_page")
                .unwrap_or(DEFAULT_PER_PAGE)
                .clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn limit(&self) -> u64 {
        self.per_page as u64
    }

    pub fn offset(&self) -> u64 {
        ((self.page - 1).saturating_mul(self.per_page)) as u64
    }

    pub fn pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit())
    }
}

pub fn filter_from_params(params: &HashMap<String, String>) -> TicketFilter {
    TicketFilter {
        id: int_param(params, "id"),
        status_id: int_param(params, "status_id"),
        dept_id: int_param(params, "dept_id"),
        subject_contains: param(params, "q").map(str::to_owned),
        requester_email: param(params, "email").map(str::to_owned),
        topic_id: int_param(params, "topic_id"),
    }
}

/// Resolves the `id` query parameter to a ticket.
pub async fn find_ticket(
    app_state: &AppState,
    params: &HashMap<String, String>,
) -> Result<Ticket, ApiError> {
    let id = int_param(params, "id")
        .ok_or_else(|| ApiError::BadRequest("Missing ticket ID".into()))?;

    app_state
        .tickets()
        .lookup(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".into()))
}

/// Ticket attributes writable through `PUT`/`PATCH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketField {
    StatusId,
    TopicId,
}

impl TicketField {
    pub const ALL: [TicketField; 2] = [TicketField::StatusId, TicketField::TopicId];

    /// JSON key of the field in request bodies.
    pub fn key(self) -> &'static str {
        match self {
            TicketField::StatusId => "status_id",
            TicketField::TopicId => "topic_id",
        }
    }

    pub fn apply(self, ticket: &mut Ticket, value: i64) {
        match self {
            TicketField::StatusId => ticket.set_status_id(value),
            TicketField::TopicId => ticket.set_topic_id(value),
        }
    }
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339()
}

#[derive(Debug, Serialize)]
pub struct MessageView {
    pub id: i64,
    pub created: String,
    pub body: String,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

impl From<ThreadEntry> for MessageView {
    fn from(entry: ThreadEntry) -> Self {
        let (user_id, user_name, user_email) = match entry.author {
            Some(author) => (Some(author.id), Some(author.name), Some(author.email)),
            None => (None, None, None),
        };

        Self {
            id: entry.id,
            created: timestamp(&entry.created_at),
            body: entry.body,
            user_id,
            user_name,
            user_email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TicketView {
    pub id: i64,
    pub number: String,
    pub subject: String,
    pub status: String,
    pub status_id: i64,
    pub dept_id: i64,
    pub priority_id: i64,
    pub topic_id: Option<i64>,
    pub created: String,
    pub updated: String,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub responses: Vec<MessageView>,
}

impl TicketView {
    pub fn new(ticket: Ticket, entries: Vec<ThreadEntry>) -> Self {
        let (user_email, user_name) = match ticket.requester {
            Some(requester) => (Some(requester.email), Some(requester.name)),
            None => (None, None),
        };

        Self {
            id: ticket.id,
            number: ticket.number,
            subject: ticket.subject,
            status: ticket.status_name,
            status_id: ticket.status_id,
            dept_id: ticket.dept_id,
            priority_id: ticket.priority_id,
            topic_id: ticket.topic_id,
            created: timestamp(&ticket.created_at),
            updated: timestamp(&ticket.updated_at),
            user_email,
            user_name,
            responses: entries.into_iter().map(MessageView::from).collect(),
        }
    }
}
