use entity::{
    matches::{self, constraints::*},
    teams,
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
                    .table(matches::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(matches::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(matches::Column::Date).date().not_null())
                    .col(
                        ColumnDef::new(matches::Column::Venue)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(matches::Column::Team1).integer().not_null())
                    .col(ColumnDef::new(matches::Column::Team2).integer().not_null())
                    .col(ColumnDef::new(matches::Column::Winner).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_MATCHES_TEAM1)
                            .from(matches::Entity, matches::Column::Team1)
                            .to(teams::Entity, teams::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_MATCHES_TEAM2)
                            .from(matches::Entity, matches::Column::Team2)
                            .to(teams::Entity, teams::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_MATCHES_WINNER)
                            .from(matches::Entity, matches::Column::Winner)
                            .to(teams::Entity, teams::Column::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(matches::Entity).to_owned())
            .await
    }
}
