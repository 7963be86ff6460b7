//! Application state shared across Axum route handlers.
//!
//! Handlers only see the collaborator traits from `db::store`, never a raw
//! database connection. Production wiring lives in [`AppState::from_db`];
//! tests build the state from in-memory doubles through [`AppState::new`].

use std::sync::Arc;

use db::{
    ApiKeyRepository, ApiKeyStore, ThreadRepository, ThreadStore, TicketDefaults,
    TicketRepository, TicketStore,
};
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    api_keys: Arc<dyn ApiKeyStore>,
    tickets: Arc<dyn TicketStore>,
    threads: Arc<dyn ThreadStore>,
}

impl AppState {
    pub fn new(
        api_keys: Arc<dyn ApiKeyStore>,
        tickets: Arc<dyn TicketStore>,
        threads: Arc<dyn ThreadStore>,
    ) -> Self {
        Self {
            api_keys,
            tickets,
            threads,
        }
    }

    /// Wires the SeaORM-backed repositories onto one connection pool.
    ///
    /// Routing defaults for new tickets are read from the global config.
    pub fn from_db(db: DatabaseConnection) -> Self {
        Self::new(
            Arc::new(ApiKeyRepository::new(db.clone())),
            Arc::new(TicketRepository::new(db.clone(), TicketDefaults::from_config())),
            Arc::new(ThreadRepository::new(db)),
        )
    }

    pub fn api_keys(&self) -> &dyn ApiKeyStore {
        self.api_keys.as_ref()
    }

    pub fn tickets(&self) -> &dyn TicketStore {
        self.tickets.as_ref()
    }

    pub fn threads(&self) -> &dyn ThreadStore {
        self.threads.as_ref()
    }
}
