pub mod models;
pub mod repositories;
pub mod store;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection, DbErr};
use std::path::Path;
use util::config;

pub use repositories::{ApiKeyRepository, ThreadRepository, TicketDefaults, TicketRepository};
pub use store::{ApiKeyStore, StoreError, ThreadStore, TicketStore};

/// Turns the configured database setting into a connection URL.
///
/// DSNs pass through untouched; anything else is treated as a SQLite file path.
pub fn database_url(path_or_url: &str) -> String {
    if is_dsn(path_or_url) {
        path_or_url.to_owned()
    } else {
        format!("sqlite://{path_or_url}?mode=rwc") // yields sqlite:///abs/path for absolute paths
    }
}

fn is_dsn(path_or_url: &str) -> bool {
    path_or_url.starts_with("sqlite:")
        || path_or_url.starts_with("postgres://")
        || path_or_url.starts_with("mysql://")
}

pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let path_or_url = config::database_path();
    let url = database_url(&path_or_url);

    if !is_dsn(&path_or_url) {
        // SQLite won't create intermediate dirs.
        if let Some(parent) = Path::new(&path_or_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
    }

    tracing::debug!(url = %url, "Connecting to database");
    Database::connect(&url).await
}
