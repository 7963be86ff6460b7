use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::models::{thread_entries, users};
use crate::store::{Author, StoreError, ThreadEntry, ThreadStore, Ticket};

#[derive(Clone)]
pub struct ThreadRepository {
    db: DatabaseConnection,
}

impl ThreadRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ThreadStore for ThreadRepository {
    async fn entries(&self, ticket: &Ticket) -> Result<Vec<ThreadEntry>, StoreError> {
        let entries = thread_entries::Model::find_conversation(&self.db, ticket.id).await?;
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: BTreeSet<i64> = entries.iter().filter_map(|e| e.user_id).collect();
        let authors: HashMap<i64, Author> = if author_ids.is_empty() {
            HashMap::new()
        } else {
            users::Entity::find()
                .filter(users::Column::Id.is_in(author_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|u| {
                    (
                        u.id,
                        Author {
                            id: u.id,
                            name: u.name,
                            email: u.email,
                        },
                    )
                })
                .collect()
        };

        Ok(entries
            .into_iter()
            .map(|e| ThreadEntry {
                author: e.user_id.and_then(|id| authors.get(&id).cloned()),
                id: e.id,
                created_at: e.created_at,
                body: e.body,
            })
            .collect())
    }
}
