use entity::{
    players::{self, constraints::*},
    teams, users,
};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(players::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(players::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(players::Column::UserId).integer().not_null())
                    .col(ColumnDef::new(players::Column::Age).integer().not_null())
                    .col(
                        ColumnDef::new(players::Column::Kind)
                            .string_len(20)
                            .not_null()
                            .default("BATTER"),
                    )
                    .col(ColumnDef::new(players::Column::Team).integer().not_null())
                    .col(
                        ColumnDef::new(players::Column::MatchesPlayed)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(players::Column::TotalRuns)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(players::Column::Wickets)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(players::Column::IsPlaying)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .index(
                        Index::create()
                            .name(UC_PLAYERS_USER_ID)
                            .col(players::Column::UserId)
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_PLAYERS_USER_ID)
                            .from(players::Entity, players::Column::UserId)
                            .to(users::Entity, users::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_PLAYERS_TEAM)
                            .from(players::Entity, players::Column::Team)
                            .to(teams::Entity, teams::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("IX_players_team")
                    .table(players::Entity)
                    .col(players::Column::Team)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(players::Entity).to_owned())
            .await
    }
}
