pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_exchange_schema;
mod m20260112_000002_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_exchange_schema::Migration),
            Box::new(m20260112_000002_add_lookup_indexes::Migration),
        ]
    }
}
