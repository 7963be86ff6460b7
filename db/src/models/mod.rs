pub mod api_keys;
pub mod departments;
pub mod help_topics;
pub mod thread_entries;
pub mod ticket_statuses;
pub mod tickets;
pub mod users;

pub use api_keys::Entity as ApiKey;
pub use departments::Entity as Department;
pub use help_topics::Entity as HelpTopic;
pub use thread_entries::Entity as ThreadEntry;
pub use ticket_statuses::Entity as TicketStatus;
pub use tickets::Entity as Ticket;
pub use users::Entity as User;
