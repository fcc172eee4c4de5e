use super::Player;
use crate::{envelope::Page, error::Result, extractors::Pagination, Json, StateTrait};
use axum::extract::State;
use entity::players;
use sea_orm::{EntityTrait, QueryOrder};

pub async fn list_players<S: StateTrait>(
    State(state): State<S>,
    pagination: Pagination,
) -> Result<Json<Page<Player>>> {
    let select = players::Entity::find().order_by_asc(players::Column::Id);
    let (count, players) = pagination.fetch(select, state.db()).await?;
    let players = super::represent_all(state.db(), players).await?;

    Ok(Json(pagination.page(count, players)))
}
