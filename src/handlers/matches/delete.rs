use crate::{
    envelope::ApiResponse,
    error::{self, Result},
    handlers::parse_id,
    standings::{self, Fixture},
    StateTrait,
};
use axum::extract::{Path, State};
use entity::matches;
use sea_orm::{EntityTrait, TransactionTrait};

pub async fn delete_match<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<ApiResponse> {
    let id = parse_id(&id, error::MATCH_NOT_FOUND)?;

    let txn = state.db().begin().await?;

    let stored = super::find_match(&txn, id).await?;

    standings::withdraw_match(&txn, &Fixture::from(&stored)).await?;
    matches::Entity::delete_by_id(stored.id).exec(&txn).await?;

    txn.commit().await?;

    info!("match {} deleted and its result withdrawn", stored.id);

    Ok(ApiResponse::message("Match deleted"))
}
