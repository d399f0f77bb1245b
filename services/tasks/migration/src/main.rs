use sea_orm_migration::prelude::*;

use taskdesk_tasks_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
