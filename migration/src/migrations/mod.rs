pub mod m202510010001_create_users;
pub mod m202510010002_create_departments;
pub mod m202510010003_create_help_topics;
pub mod m202510010004_create_ticket_statuses;
pub mod m202510010005_create_tickets;
pub mod m202510010006_create_thread_entries;
pub mod m202510010007_create_api_keys;
