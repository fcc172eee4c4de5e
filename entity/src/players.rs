use super::{teams, users};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub mod constraints {
    pub const UC_PLAYERS_USER_ID: &str = "UC_players_user_id";
    pub const FK_PLAYERS_USER_ID: &str = "FK_players_user_id";
    pub const FK_PLAYERS_TEAM: &str = "FK_players_team";
}

/// Size of a team's playing XI.
pub const PLAYING_XI: u64 = 11;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub age: i32,
    #[sea_orm(column_name = "type")]
    pub kind: PlayerType,
    pub team: i32,
    pub matches_played: i32,
    pub total_runs: i32,
    pub wickets: i32,
    pub is_playing: bool,
}

#[derive(
    EnumIter, DeriveActiveEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerType {
    #[default]
    #[sea_orm(string_value = "BATTER")]
    Batter,
    #[sea_orm(string_value = "BOWLER")]
    Bowler,
    #[sea_orm(string_value = "ALL_ROUNDER")]
    AllRounder,
    #[sea_orm(string_value = "WICKET_KEEPER")]
    WicketKeeper,
}

impl PlayerType {
    pub const ALL: &'static [PlayerType] = &[
        PlayerType::Batter,
        PlayerType::Bowler,
        PlayerType::AllRounder,
        PlayerType::WicketKeeper,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PlayerType::Batter => "BATTER",
            PlayerType::Bowler => "BOWLER",
            PlayerType::AllRounder => "ALL_ROUNDER",
            PlayerType::WicketKeeper => "WICKET_KEEPER",
        }
    }

    #[inline]
    pub const fn bats(&self) -> bool {
        !matches!(self, PlayerType::Bowler)
    }

    #[inline]
    pub const fn bowls(&self) -> bool {
        matches!(self, PlayerType::Bowler | PlayerType::AllRounder)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlayerType;

impl FromStr for PlayerType {
    type Err = UnknownPlayerType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or(UnknownPlayerType)
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Team,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::User => Entity::belongs_to(users::Entity)
                .from(Column::UserId)
                .to(users::Column::Id)
                .into(),
            Self::Team => Entity::belongs_to(teams::Entity)
                .from(Column::Team)
                .to(teams::Column::Id)
                .into(),
        }
    }
}

impl Related<users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    #[inline]
    pub fn find_in_team(team_id: i32) -> Select<Entity> {
        Self::find().filter(Column::Team.eq(team_id))
    }

    #[inline]
    pub fn find_playing_xi(team_id: i32) -> Select<Entity> {
        Self::find_in_team(team_id).filter(Column::IsPlaying.eq(true))
    }

    #[inline]
    pub fn find_by_user(user_id: i32) -> Select<Entity> {
        Self::find().filter(Column::UserId.eq(user_id))
    }
}
