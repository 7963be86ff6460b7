use colored::*;
use migration::Migrator;
use sea_orm_migration::prelude::*;
use std::time::Instant;

const STATUS_COLUMN: usize = 80;

pub async fn run_all_migrations(url: &str) -> Result<(), DbErr> {
    let db = sea_orm::Database::connect(url).await?;

    println!("Running migrations...");
    let pending = Migrator::get_pending_migrations(&db).await?;
    if pending.is_empty() {
        println!("{}", "Nothing to apply, schema is up to date".dimmed());
        return Ok(());
    }

    for migration in &pending {
        let name_str = format!("Pending {}", migration.name().bold());
        let dots = ".".repeat(STATUS_COLUMN.saturating_sub(name_str.len()));
        println!("{}{} {}", name_str, dots, "queued".yellow());
    }

    let start = Instant::now();
    match Migrator::up(&db, None).await {
        Ok(()) => {
            let time_str = format!("({:.2?})", start.elapsed()).dimmed();
            println!("{} {}", "done".green(), time_str);
            Ok(())
        }
        Err(err) => {
            println!("{}", "failed".red());
            Err(err)
        }
    }
}
