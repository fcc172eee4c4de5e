use crate::{
    envelope::ApiResponse,
    error::{self, Result},
    handlers::parse_id,
    standings::{Fixture, Standings},
    StateTrait,
};
use axum::extract::{Path, State};
use entity::{matches, players, teams};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};

/// Deletes the team together with its players and matches. The results of
/// those matches are taken back from the opponents first.
pub async fn delete_team<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<ApiResponse> {
    let id = parse_id(&id, error::TEAM_NOT_FOUND)?;

    let txn = state.db().begin().await?;

    let team = super::find_team(&txn, id).await?;

    let fixtures: Vec<Fixture> = teams::Entity::find_fixtures(team.id)
        .all(&txn)
        .await?
        .iter()
        .map(Fixture::from)
        .collect();

    if !fixtures.is_empty() {
        let opponents = fixtures
            .iter()
            .flat_map(Fixture::teams)
            .filter(|opponent| *opponent != team.id);

        let mut standings = Standings::load(&txn, opponents).await?;

        for fixture in &fixtures {
            standings.withdraw(fixture);
        }

        standings.save(&txn).await?;

        matches::Entity::delete_many()
            .filter(
                matches::Column::Team1
                    .eq(team.id)
                    .or(matches::Column::Team2.eq(team.id)),
            )
            .exec(&txn)
            .await?;
    }

    players::Entity::delete_many()
        .filter(players::Column::Team.eq(team.id))
        .exec(&txn)
        .await?;

    teams::Entity::delete_by_id(team.id).exec(&txn).await?;

    txn.commit().await?;

    info!(
        "team {} deleted, {} match results withdrawn",
        team.id,
        fixtures.len()
    );

    Ok(ApiResponse::message("Team deleted"))
}
