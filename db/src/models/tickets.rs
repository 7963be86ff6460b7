use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryFilter};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Public ticket number shown to requesters.
    #[sea_orm(unique)]
    pub number: String,

    pub subject: String,

    /// Requester.
    pub user_id: i64,

    pub status_id: i64,
    pub dept_id: i64,
    pub priority_id: i64,
    pub topic_id: Option<i64>,

    pub source: String,
    pub ip_address: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::ticket_statuses::Entity",
        from = "Column::StatusId",
        to = "super::ticket_statuses::Column::Id"
    )]
    Status,

    #[sea_orm(has_many = "super::thread_entries::Entity")]
    ThreadEntries,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::ticket_statuses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Status.def()
    }
}

impl Related<super::thread_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ThreadEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn number_exists<C: ConnectionTrait>(db: &C, number: &str) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::Number.eq(number))
            .count(db)
            .await?;
        Ok(count > 0)
    }
}
