mod create;
mod delete;
mod get;
mod list;
mod update;

use crate::{
    error::{self, Result},
    middlewares::{RolesLayer, ORGANISERS},
    standings::Fixture,
    state::StateTrait,
    utils::validation,
};
use axum::{handler::Handler, routing::get, Router};
use chrono::NaiveDate;
use entity::{matches, teams};
use sea_orm::{ConnectionTrait, EntityTrait, QuerySelect};
use serde::Serialize;
use validator::ValidationErrors;

/// Routes for matches, all restricted to organisers
///
/// GET    /matches
/// POST   /matches
/// GET    /matches/{id}
/// PUT    /matches/{id}
/// DELETE /matches/{id}
pub fn routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .route(
            "/matches",
            get(list::list_matches::<S>.layer(RolesLayer::new(ORGANISERS)))
                .post(create::create_match::<S>.layer(RolesLayer::new(ORGANISERS))),
        )
        .route(
            "/matches/{id}",
            get(get::get_match::<S>.layer(RolesLayer::new(ORGANISERS)))
                .put(update::update_match::<S>.layer(RolesLayer::new(ORGANISERS)))
                .delete(delete::delete_match::<S>.layer(RolesLayer::new(ORGANISERS))),
        )
}

#[derive(Debug, Serialize)]
pub struct Match {
    id: i32,
    date: NaiveDate,
    venue: String,
    team1: i32,
    team2: i32,
    winner: Option<i32>,
}

impl From<matches::Model> for Match {
    fn from(model: matches::Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            venue: model.venue,
            team1: model.team1,
            team2: model.team2,
            winner: model.winner,
        }
    }
}

/// Loads a match and locks it for the rest of the transaction.
async fn find_match(db: &impl ConnectionTrait, id: i32) -> Result<matches::Model> {
    matches::Entity::find_by_id(id)
        .lock_exclusive()
        .one(db)
        .await?
        .ok_or(error::MATCH_NOT_FOUND)
}

const WINNER_NOT_PLAYING: &str = "Winner must be either team1 or team2.";
const SAME_TEAMS: &str = "team1 and team2 must be different teams.";

/// Cross-field and referential rules of a fixture.
async fn check_fixture(
    db: &impl ConnectionTrait,
    errors: &mut ValidationErrors,
    fixture: &Fixture,
) -> Result<()> {
    for (field, team) in [("team1", fixture.team1), ("team2", fixture.team2)] {
        if teams::Entity::find_by_id(team).one(db).await?.is_none() {
            errors.add(field, validation::does_not_exist(team));
        }
    }

    if fixture.team1 == fixture.team2 {
        errors.add("team2", validation::invalid("same_team", SAME_TEAMS));
    }

    if let Some(winner) = fixture.winner {
        if !fixture.involves(winner) {
            errors.add("winner", validation::invalid("not_playing", WINNER_NOT_PLAYING));
        }
    }

    Ok(())
}
