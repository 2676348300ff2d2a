use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202607150001_create_users::Migration),
            Box::new(migrations::m202607150002_create_submissions::Migration),
            Box::new(migrations::m202607150003_create_osce_stations::Migration),
            Box::new(migrations::m202607150004_create_penalties::Migration),
        ]
    }
}
