//! Collaborator interfaces consumed by the HTTP layer.
//!
//! The ticket endpoint never talks to SeaORM directly. It is handed trait
//! objects for the API-key store, the ticket store and the thread store, so the
//! persistence backend can be swapped for in-memory doubles in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// Failure raised by a collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    /// Domain validation rejected the input; each entry is a human-readable reason.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("{0}")]
    Invalid(String),
}

/// An authorization record resolved from a presented API key.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiKeyRecord {
    pub id: i64,
    pub key: String,
    pub ip_address: Option<String>,
}

impl ApiKeyRecord {
    /// Source address the key is pinned to. Blank values mean "not pinned".
    pub fn bound_ip(&self) -> Option<&str> {
        self.ip_address
            .as_deref()
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Requester {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A support ticket as seen by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: i64,
    pub number: String,
    pub subject: String,
    pub status_id: i64,
    pub status_name: String,
    pub dept_id: i64,
    pub priority_id: i64,
    pub topic_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub requester: Option<Requester>,
}

impl Ticket {
    pub fn set_status_id(&mut self, status_id: i64) {
        self.status_id = status_id;
    }

    pub fn set_topic_id(&mut self, topic_id: i64) {
        self.topic_id = Some(topic_id);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// One message in a ticket's conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadEntry {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub body: String,
    pub author: Option<Author>,
}

/// Predicates for listing tickets. Every present field must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketFilter {
    pub id: Option<i64>,
    pub status_id: Option<i64>,
    pub dept_id: Option<i64>,
    pub subject_contains: Option<String>,
    pub requester_email: Option<String>,
    pub topic_id: Option<i64>,
}

/// Input for opening a ticket on behalf of a requester.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTicket {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub ip_address: String,
    pub source: String,
    pub topic_id: Option<i64>,
}

#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    /// Resolves an active key. Unknown and disabled keys both yield `None`.
    async fn lookup_by_key(&self, key: &str) -> Result<Option<ApiKeyRecord>, StoreError>;
}

#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn count(&self, filter: &TicketFilter) -> Result<u64, StoreError>;

    /// One page of matching tickets in ascending id order.
    async fn find_page(
        &self,
        filter: &TicketFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Ticket>, StoreError>;

    /// Opens a ticket. Rejected input comes back as [`StoreError::Validation`].
    async fn create(&self, new_ticket: NewTicket) -> Result<Ticket, StoreError>;

    async fn lookup(&self, id: i64) -> Result<Option<Ticket>, StoreError>;

    /// Persists the mutable fields of `ticket` (status and topic).
    async fn save(&self, ticket: &Ticket) -> Result<(), StoreError>;

    async fn delete(&self, ticket: &Ticket) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ThreadStore: Send + Sync {
    /// The ticket's conversation, oldest first. Empty when there is no thread.
    async fn entries(&self, ticket: &Ticket) -> Result<Vec<ThreadEntry>, StoreError>;
}
