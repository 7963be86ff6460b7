use sea_orm::entity::prelude::*;
use sea_orm::QueryFilter;

/// Help topics classify incoming tickets and carry routing defaults.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "help_topics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,

    /// Department new tickets under this topic are routed to.
    pub dept_id: Option<i64>,
    pub priority_id: Option<i64>,

    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DeptId",
        to = "super::departments::Column::Id"
    )]
    Department,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn find_active<C: ConnectionTrait>(db: &C, topic_id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(topic_id)
            .filter(Column::IsActive.eq(true))
            .one(db)
            .await
    }
}
