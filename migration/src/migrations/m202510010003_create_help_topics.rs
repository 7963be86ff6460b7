use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010003_create_help_topics"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("help_topics"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("dept_id")).big_integer())
                    .col(ColumnDef::new(Alias::new("priority_id")).big_integer())
                    .col(ColumnDef::new(Alias::new("is_active")).boolean().not_null().default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("help_topics"), Alias::new("dept_id"))
                            .to(Alias::new("departments"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Stock topics: both route to the Support department.
        manager
            .exec_stmt(
                Query::insert()
                    .into_table(Alias::new("help_topics"))
                    .columns([
                        Alias::new("id"),
                        Alias::new("name"),
                        Alias::new("dept_id"),
                        Alias::new("priority_id"),
                        Alias::new("is_active"),
                    ])
                    .values_panic([1.into(), "General Inquiry".into(), 1.into(), 2.into(), true.into()])
                    .values_panic([2.into(), "Report a Problem".into(), 1.into(), 3.into(), true.into()])
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("help_topics")).to_owned())
            .await
    }
}
