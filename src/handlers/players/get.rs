use super::Player;
use crate::{
    envelope::ApiResponse,
    error::{self, Result},
    handlers::parse_id,
    StateTrait,
};
use axum::extract::{Path, State};

pub async fn get_player<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Player>> {
    let id = parse_id(&id, error::PLAYER_NOT_FOUND)?;

    let player = super::find_player(state.db(), id).await?;
    let player = super::represent(state.db(), player).await?;

    Ok(ApiResponse::ok(player))
}
