use super::Match;
use crate::{envelope::Page, error::Result, extractors::Pagination, Json, StateTrait};
use axum::extract::State;
use entity::matches;
use sea_orm::{EntityTrait, QueryOrder};

pub async fn list_matches<S: StateTrait>(
    State(state): State<S>,
    pagination: Pagination,
) -> Result<Json<Page<Match>>> {
    let select = matches::Entity::find().order_by_asc(matches::Column::Id);
    let (count, matches) = pagination.fetch(select, state.db()).await?;

    let results = matches.into_iter().map(Match::from).collect();

    Ok(Json(pagination.page(count, results)))
}
