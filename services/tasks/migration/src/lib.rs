use sea_orm_migration::prelude::*;

mod m20260801_000001_create_accounts;
mod m20260801_000002_create_customers;
mod m20260801_000003_create_employees;
mod m20260801_000004_create_tasks;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_accounts::Migration),
            Box::new(m20260801_000002_create_customers::Migration),
            Box::new(m20260801_000003_create_employees::Migration),
            Box::new(m20260801_000004_create_tasks::Migration),
        ]
    }
}
