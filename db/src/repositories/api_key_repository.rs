use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::models::api_keys::{Column, Entity};
use crate::store::{ApiKeyRecord, ApiKeyStore, StoreError};

#[derive(Clone)]
pub struct ApiKeyRepository {
    db: DatabaseConnection,
}

impl ApiKeyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ApiKeyStore for ApiKeyRepository {
    async fn lookup_by_key(&self, key: &str) -> Result<Option<ApiKeyRecord>, StoreError> {
        let model = Entity::find()
            .filter(Column::ApiKey.eq(key))
            .filter(Column::IsActive.eq(true))
            .one(&self.db)
            .await?;

        Ok(model.map(|m| ApiKeyRecord {
            id: m.id,
            key: m.api_key,
            ip_address: m.ip_address,
        }))
    }
}
