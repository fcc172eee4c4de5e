mod create;
mod delete;
mod get;
mod list;
mod update;

use crate::{
    error::{self, Result},
    middlewares::{RolesLayer, ORGANISERS, STAFF},
    state::StateTrait,
    utils::validation,
};
use axum::{handler::Handler, routing::get, Router};
use chrono::{DateTime, Utc};
use entity::{players, teams, users};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use std::collections::HashMap;
use serde::Serialize;
use validator::ValidationErrors;

/// Routes for teams
///
/// GET    /teams       staff
/// POST   /teams       organisers
/// GET    /teams/{id}  staff
/// PUT    /teams/{id}  organisers
/// DELETE /teams/{id}  organisers
pub fn routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .route(
            "/teams",
            get(list::list_teams::<S>.layer(RolesLayer::new(STAFF)))
                .post(create::create_team::<S>.layer(RolesLayer::new(ORGANISERS))),
        )
        .route(
            "/teams/{id}",
            get(get::get_team::<S>.layer(RolesLayer::new(STAFF)))
                .put(update::update_team::<S>.layer(RolesLayer::new(ORGANISERS)))
                .delete(delete::delete_team::<S>.layer(RolesLayer::new(ORGANISERS))),
        )
}

#[derive(Debug, Serialize)]
pub struct Team {
    id: i32,
    name: String,
    country: String,
    captain: Option<i32>,
    matches_played: i32,
    wins: i32,
    lost: i32,
    draw: i32,
    points: i32,
    created_at: DateTime<Utc>,
    players: Vec<i32>,
}

async fn find_team(db: &impl ConnectionTrait, id: i32) -> Result<teams::Model> {
    teams::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(error::TEAM_NOT_FOUND)
}

impl Team {
    fn new(team: teams::Model, players: Vec<i32>) -> Self {
        Self {
            id: team.id,
            name: team.name,
            country: team.country,
            captain: team.captain,
            matches_played: team.matches_played,
            wins: team.wins,
            lost: team.lost,
            draw: team.draw,
            points: team.points,
            created_at: team.created_at,
            players,
        }
    }
}

async fn represent(db: &impl ConnectionTrait, team: teams::Model) -> Result<Team> {
    let players = players::Entity::find_in_team(team.id)
        .select_only()
        .column(players::Column::Id)
        .order_by_asc(players::Column::Id)
        .into_tuple::<i32>()
        .all(db)
        .await?;

    Ok(Team::new(team, players))
}

/// Same as `represent`, with one query for the players of every team.
async fn represent_all(
    db: &impl ConnectionTrait,
    teams: Vec<teams::Model>,
) -> Result<Vec<Team>> {
    let rows = players::Entity::find()
        .select_only()
        .column(players::Column::Id)
        .column(players::Column::Team)
        .filter(players::Column::Team.is_in(teams.iter().map(|team| team.id)))
        .order_by_asc(players::Column::Id)
        .into_tuple::<(i32, i32)>()
        .all(db)
        .await?;

    let mut rosters: HashMap<i32, Vec<i32>> = HashMap::new();
    for (player, team) in rows {
        rosters.entry(team).or_default().push(player);
    }

    Ok(teams
        .into_iter()
        .map(|team| {
            let players = rosters.remove(&team.id).unwrap_or_default();
            Team::new(team, players)
        })
        .collect())
}

async fn check_captain(
    db: &impl ConnectionTrait,
    errors: &mut ValidationErrors,
    captain: Option<i32>,
) -> Result<()> {
    if let Some(captain) = captain {
        if users::Entity::find_by_id(captain).one(db).await?.is_none() {
            errors.add("captain", validation::does_not_exist(captain));
        }
    }

    Ok(())
}
