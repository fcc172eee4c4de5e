mod matches;
mod players;
mod register;
mod teams;
mod token;

use crate::{error::Error, state::StateTrait, Result};
use axum::{extract::State, http::StatusCode, routing::get, Router};
use sea_orm::ConnectionTrait;

pub fn routes<S: StateTrait>() -> Router<S> {
    let api = Router::new()
        .merge(register::routes::<S>())
        .merge(token::routes::<S>())
        .merge(players::routes::<S>())
        .merge(teams::routes::<S>())
        .merge(matches::routes::<S>());

    Router::new()
        .nest("/api", api)
        .route("/livez", get(liveness::<S>))
        .route("/readyz", get(|| async {}))
}

async fn liveness<S: StateTrait>(State(state): State<S>) -> StatusCode {
    if let Err(error) = state.db().execute_unprepared("select 1").await {
        error!("database is unreachable: {error}");
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    StatusCode::OK
}

/// Ids in paths are plain integers; anything else names no resource.
fn parse_id(id: &str, not_found: Error) -> Result<i32> {
    id.parse().map_err(|_| not_found)
}
