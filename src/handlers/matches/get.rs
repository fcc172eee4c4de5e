use super::Match;
use crate::{
    envelope::ApiResponse,
    error::{self, Result},
    handlers::parse_id,
    StateTrait,
};
use axum::extract::{Path, State};
use entity::matches;
use sea_orm::EntityTrait;

pub async fn get_match<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Match>> {
    let id = parse_id(&id, error::MATCH_NOT_FOUND)?;

    let model = matches::Entity::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(error::MATCH_NOT_FOUND)?;

    Ok(ApiResponse::ok(Match::from(model)))
}
