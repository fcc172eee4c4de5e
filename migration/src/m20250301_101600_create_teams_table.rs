use entity::{
    teams::{self, constraints::*},
    users,
};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let counter = |column: teams::Column| {
            ColumnDef::new(column)
                .integer()
                .not_null()
                .default(0)
                .to_owned()
        };

        manager
            .create_table(
                Table::create()
                    .table(teams::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(teams::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(teams::Column::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(teams::Column::Country)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(teams::Column::Captain).integer().null())
                    .col(&mut counter(teams::Column::MatchesPlayed))
                    .col(&mut counter(teams::Column::Wins))
                    .col(&mut counter(teams::Column::Lost))
                    .col(&mut counter(teams::Column::Draw))
                    .col(&mut counter(teams::Column::Points))
                    .col(
                        ColumnDef::new(teams::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_TEAMS_CAPTAIN)
                            .from(teams::Entity, teams::Column::Captain)
                            .to(users::Entity, users::Column::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(teams::Entity).to_owned())
            .await
    }
}
