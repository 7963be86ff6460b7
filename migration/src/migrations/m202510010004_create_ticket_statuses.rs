use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010004_create_ticket_statuses"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("ticket_statuses"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("name")).string().not_null().unique_key())
                    .col(ColumnDef::new(Alias::new("state")).string().not_null())
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert()
            .into_table(Alias::new("ticket_statuses"))
            .columns([Alias::new("id"), Alias::new("name"), Alias::new("state")])
            .to_owned();
        for (id, name, state) in [
            (1, "Open", "open"),
            (2, "Resolved", "closed"),
            (3, "Closed", "closed"),
            (4, "Archived", "archived"),
            (5, "Deleted", "deleted"),
        ] {
            insert.values_panic([id.into(), name.into(), state.into()]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("ticket_statuses")).to_owned())
            .await
    }
}
