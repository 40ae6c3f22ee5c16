pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20250301_000001_users;
mod m20250301_000002_links;
mod m20250315_000001_usage_stats;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_users::Migration),
            Box::new(m20250301_000002_links::Migration),
            Box::new(m20250315_000001_usage_stats::Migration),
        ]
    }
}
