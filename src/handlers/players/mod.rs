mod create;
mod delete;
mod get;
mod list;
mod update;

use crate::{
    error::{self, Error, Result},
    middlewares::{RolesLayer, EVERYONE, STAFF},
    state::StateTrait,
    utils::validation,
};
use axum::{handler::Handler, routing::get, Router};
use entity::{
    players::{self, PlayerType},
    teams,
    users::{self, Role},
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};
use serde::Serialize;
use std::collections::HashMap;
use validator::ValidationErrors;

/// Routes for player profiles
///
/// GET    /players       every role
/// POST   /players       staff
/// GET    /players/{id}  every role
/// PUT    /players/{id}  every role, players only their own profile
/// DELETE /players/{id}  staff, only admins for other people's profiles
pub fn routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .route(
            "/players",
            get(list::list_players::<S>.layer(RolesLayer::new(EVERYONE)))
                .post(create::create_player::<S>.layer(RolesLayer::new(STAFF))),
        )
        .route(
            "/players/{id}",
            get(get::get_player::<S>.layer(RolesLayer::new(EVERYONE)))
                .put(update::update_player::<S>.layer(RolesLayer::new(EVERYONE)))
                .delete(delete::delete_player::<S>.layer(RolesLayer::new(STAFF))),
        )
}

#[derive(Debug, Serialize)]
pub struct User {
    id: i32,
    username: String,
    email: String,
    category: Role,
}

#[derive(Debug, Serialize)]
pub struct Player {
    id: i32,
    user: User,
    age: i32,
    #[serde(rename = "type")]
    kind: PlayerType,
    team: i32,
    matches_played: i32,
    total_runs: i32,
    wickets: i32,
    is_playing: bool,
}

impl Player {
    fn new(player: players::Model, user: users::Model) -> Self {
        Self {
            id: player.id,
            user: User {
                id: user.id,
                username: user.username,
                email: user.email,
                category: user.category,
            },
            age: player.age,
            kind: player.kind,
            team: player.team,
            matches_played: player.matches_played,
            total_runs: player.total_runs,
            wickets: player.wickets,
            is_playing: player.is_playing,
        }
    }
}

async fn find_player(db: &impl ConnectionTrait, id: i32) -> Result<players::Model> {
    players::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(error::PLAYER_NOT_FOUND)
}

async fn represent(db: &impl ConnectionTrait, player: players::Model) -> Result<Player> {
    let user = users::Entity::find_by_id(player.user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::internal(format!("player {} has no user", player.id)))?;

    Ok(Player::new(player, user))
}

async fn represent_all(
    db: &impl ConnectionTrait,
    players: Vec<players::Model>,
) -> Result<Vec<Player>> {
    let mut users: HashMap<i32, users::Model> = users::Entity::find()
        .filter(users::Column::Id.is_in(players.iter().map(|player| player.user_id)))
        .all(db)
        .await?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();

    players
        .into_iter()
        .map(|player| match users.remove(&player.user_id) {
            Some(user) => Ok(Player::new(player, user)),
            None => Err(Error::internal(format!("player {} has no user", player.id))),
        })
        .collect()
}

/// Whether the playing XI of `team` is already full, not counting `except`.
///
/// Locks the team row, so concurrent selections into the same team queue up
/// behind this transaction.
async fn playing_xi_full(
    db: &impl ConnectionTrait,
    team: i32,
    except: Option<i32>,
) -> Result<bool> {
    teams::Entity::find_by_id(team)
        .lock_exclusive()
        .one(db)
        .await?;

    let mut select = players::Entity::find_playing_xi(team);

    if let Some(id) = except {
        select = select.filter(players::Column::Id.ne(id));
    }

    Ok(select.count(db).await? >= players::PLAYING_XI)
}

const XI_FULL: &str = "A team can only have 11 players in the playing XI.";
const PROFILE_EXISTS: &str = "player profile with this user already exists.";

/// Checks the rows a profile points at. `profile` is the profile being
/// edited, which may keep its own user.
async fn check_references(
    db: &impl ConnectionTrait,
    errors: &mut ValidationErrors,
    user_id: Option<i32>,
    team: Option<i32>,
    profile: Option<i32>,
) -> Result<()> {
    if let Some(user_id) = user_id {
        match users::Entity::find_by_id(user_id).one(db).await? {
            Some(user) if user.category == Role::Player => {
                let existing = players::Entity::find_by_user(user_id).one(db).await?;

                if existing.is_some_and(|existing| Some(existing.id) != profile) {
                    errors.add("user_id", validation::invalid("unique", PROFILE_EXISTS));
                }
            }
            _ => errors.add("user_id", validation::does_not_exist(user_id)),
        }
    }

    if let Some(team) = team {
        if teams::Entity::find_by_id(team).one(db).await?.is_none() {
            errors.add("team", validation::does_not_exist(team));
        }
    }

    Ok(())
}
