use sea_orm_migration::prelude::*;

mod m20200707_initial;
mod m20200722_index_variants;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20200707_initial::Migration),
            Box::new(m20200722_index_variants::Migration),
        ]
    }
}
