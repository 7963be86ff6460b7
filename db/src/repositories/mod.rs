//! SeaORM-backed implementations of the collaborator traits in [`crate::store`].

mod api_key_repository;
mod thread_repository;
mod ticket_repository;

pub use api_key_repository::ApiKeyRepository;
pub use thread_repository::ThreadRepository;
pub use ticket_repository::{TicketDefaults, TicketRepository};
