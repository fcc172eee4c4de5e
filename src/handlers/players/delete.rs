use crate::{
    envelope::ApiResponse,
    error::{self, Result},
    handlers::parse_id,
    jwt::Claims,
    StateTrait,
};
use axum::extract::{Path, State};
use entity::{players, users::Role};
use sea_orm::{EntityTrait, TransactionTrait};

pub async fn delete_player<S: StateTrait>(
    State(state): State<S>,
    claims: Claims,
    Path(id): Path<String>,
) -> Result<ApiResponse> {
    let id = parse_id(&id, error::PLAYER_NOT_FOUND)?;

    let txn = state.db().begin().await?;

    let player = super::find_player(&txn, id).await?;

    if claims.category != Role::Admin && player.user_id != claims.user_id {
        warn!(
            "user {} tried to delete the profile of user {}",
            claims.user_id, player.user_id
        );
        return Err(error::UNAUTHORIZED);
    }

    players::Entity::delete_by_id(player.id).exec(&txn).await?;

    txn.commit().await?;

    info!("player profile {} deleted by user {}", player.id, claims.user_id);

    Ok(ApiResponse::message("Player deleted"))
}
