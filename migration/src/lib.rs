pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users_and_accounts;
mod m20260301_000002_create_auth_tokens;
mod m20260301_000003_create_catalog_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users_and_accounts::Migration),
            Box::new(m20260301_000002_create_auth_tokens::Migration),
            Box::new(m20260301_000003_create_catalog_tables::Migration),
        ]
    }
}
