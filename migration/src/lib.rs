pub use sea_orm_migration::prelude::*;

mod m20250301_101500_create_users_table;
mod m20250301_101600_create_teams_table;
mod m20250301_101700_create_players_table;
mod m20250301_101800_create_matches_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_101500_create_users_table::Migration),
            Box::new(m20250301_101600_create_teams_table::Migration),
            Box::new(m20250301_101700_create_players_table::Migration),
            Box::new(m20250301_101800_create_matches_table::Migration),
        ]
    }
}
