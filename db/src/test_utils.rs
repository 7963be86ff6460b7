//! Fixtures shared by the `db` and `api` test suites.

use chrono::{Duration, Utc};
use migration::Migrator;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use crate::models::{
    api_keys,
    thread_entries::{self, ThreadKind},
    tickets, users,
};

pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn insert_api_key(
    db: &DatabaseConnection,
    key: &str,
    ip_address: Option<&str>,
    is_active: bool,
) -> Result<api_keys::Model, DbErr> {
    api_keys::ActiveModel {
        api_key: Set(key.to_owned()),
        ip_address: Set(ip_address.map(str::to_owned)),
        is_active: Set(is_active),
        notes: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn insert_user(db: &DatabaseConnection, name: &str, email: &str) -> Result<users::Model, DbErr> {
    users::Model::create(db, name, email).await
}

/// Inserts a ticket directly, bypassing the repository's validation.
pub async fn insert_ticket(
    db: &DatabaseConnection,
    number: &str,
    subject: &str,
    user_id: i64,
    status_id: i64,
    dept_id: i64,
    topic_id: Option<i64>,
) -> Result<tickets::Model, DbErr> {
    let now = Utc::now();
    tickets::ActiveModel {
        number: Set(number.to_owned()),
        subject: Set(subject.to_owned()),
        user_id: Set(user_id),
        status_id: Set(status_id),
        dept_id: Set(dept_id),
        priority_id: Set(2),
        topic_id: Set(topic_id),
        source: Set("Web".to_owned()),
        ip_address: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn insert_entry(
    db: &DatabaseConnection,
    ticket_id: i64,
    user_id: Option<i64>,
    kind: ThreadKind,
    body: &str,
    minutes_ago: i64,
) -> Result<thread_entries::Model, DbErr> {
    thread_entries::ActiveModel {
        ticket_id: Set(ticket_id),
        user_id: Set(user_id),
        kind: Set(kind),
        body: Set(body.to_owned()),
        created_at: Set(Utc::now() - Duration::minutes(minutes_ago)),
        ..Default::default()
    }
    .insert(db)
    .await
}
