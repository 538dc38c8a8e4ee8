pub use sea_orm_migration::prelude::*;

mod env;
mod m20250601_000001_create_property;

pub use env::{credentials_url, env_database_url};

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250601_000001_create_property::Migration)]
    }
}
