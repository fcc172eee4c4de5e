use super::Team;
use crate::{
    envelope::ApiResponse,
    error::{self, Result},
    handlers::parse_id,
    StateTrait,
};
use axum::extract::{Path, State};

pub async fn get_team<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Team>> {
    let id = parse_id(&id, error::TEAM_NOT_FOUND)?;

    let team = super::find_team(state.db(), id).await?;

    Ok(ApiResponse::ok(super::represent(state.db(), team).await?))
}
