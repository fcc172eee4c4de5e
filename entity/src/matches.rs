use super::teams;
use sea_orm::entity::prelude::*;

pub mod constraints {
    pub const FK_MATCHES_TEAM1: &str = "FK_matches_team1";
    pub const FK_MATCHES_TEAM2: &str = "FK_matches_team2";
    pub const FK_MATCHES_WINNER: &str = "FK_matches_winner";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: Date,
    pub venue: String,
    pub team1: i32,
    pub team2: i32,
    pub winner: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Team1,
    Team2,
    Winner,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Team1 => Entity::belongs_to(teams::Entity)
                .from(Column::Team1)
                .to(teams::Column::Id)
                .into(),
            Self::Team2 => Entity::belongs_to(teams::Entity)
                .from(Column::Team2)
                .to(teams::Column::Id)
                .into(),
            Self::Winner => Entity::belongs_to(teams::Entity)
                .from(Column::Winner)
                .to(teams::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
