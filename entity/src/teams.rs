use super::{matches, players, users};
use sea_orm::{entity::prelude::*, Condition};

pub mod constraints {
    pub const FK_TEAMS_CAPTAIN: &str = "FK_teams_captain";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub country: String,
    pub captain: Option<i32>,
    pub matches_played: i32,
    pub wins: i32,
    pub lost: i32,
    pub draw: i32,
    pub points: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Captain,
    Players,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Captain => Entity::belongs_to(users::Entity)
                .from(Column::Captain)
                .to(users::Column::Id)
                .into(),
            Self::Players => Entity::has_many(players::Entity).into(),
        }
    }
}

impl Related<players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Players.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    /// Every match the team took part in, on either side.
    #[inline]
    pub fn find_fixtures(team_id: i32) -> Select<matches::Entity> {
        matches::Entity::find().filter(
            Condition::any()
                .add(matches::Column::Team1.eq(team_id))
                .add(matches::Column::Team2.eq(team_id)),
        )
    }
}
