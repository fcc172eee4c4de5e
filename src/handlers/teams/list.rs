use super::Team;
use crate::{envelope::Page, error::Result, extractors::Pagination, Json, StateTrait};
use axum::extract::State;
use entity::teams;
use sea_orm::{EntityTrait, QueryOrder};

pub async fn list_teams<S: StateTrait>(
    State(state): State<S>,
    pagination: Pagination,
) -> Result<Json<Page<Team>>> {
    let select = teams::Entity::find().order_by_asc(teams::Column::Id);
    let (count, teams) = pagination.fetch(select, state.db()).await?;

    let results = super::represent_all(state.db(), teams).await?;

    Ok(Json(pagination.page(count, results)))
}
