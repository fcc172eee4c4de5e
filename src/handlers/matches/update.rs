use super::Match;
use crate::{
    envelope::ApiResponse,
    error::{self, Error, Result},
    extractors::Json,
    handlers::parse_id,
    standings::{self, Fixture},
    utils::validation,
    StateTrait,
};
use axum::extract::{Path, State};
use sea_orm::{ActiveModelTrait, IntoActiveModel, Set, TransactionTrait};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Deserialize, Validate)]
pub struct Request {
    #[validate(custom(function = "validation::date"))]
    date: Option<String>,
    #[validate(
        custom(function = "validation::not_blank"),
        length(max = 200, message = "Ensure this field has no more than 200 characters.")
    )]
    venue: Option<String>,
    team1: Option<i32>,
    team2: Option<i32>,
    /// `null` turns the match into a draw, a missing key keeps the result.
    #[serde(default, with = "::serde_with::rust::double_option")]
    winner: Option<Option<i32>>,
}

/// Edits a match and moves its result in the standings accordingly.
pub async fn update_match<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
    Json(request): Json<Request>,
) -> Result<ApiResponse<Match>> {
    let id = parse_id(&id, error::MATCH_NOT_FOUND)?;

    let txn = state.db().begin().await?;

    let stored = super::find_match(&txn, id).await?;

    request.validate()?;

    let old = Fixture::from(&stored);
    let new = Fixture {
        team1: request.team1.unwrap_or(old.team1),
        team2: request.team2.unwrap_or(old.team2),
        winner: request.winner.unwrap_or(old.winner),
    };

    let mut errors = ValidationErrors::new();
    super::check_fixture(&txn, &mut errors, &new).await?;

    if !errors.is_empty() {
        return Err(Error::validation(errors));
    }

    let mut active_model = stored.into_active_model();

    if let Some(date) = request.date.as_deref().and_then(validation::parse_date) {
        active_model.date = Set(date);
    }

    if let Some(venue) = request.venue {
        active_model.venue = Set(venue);
    }

    active_model.team1 = Set(new.team1);
    active_model.team2 = Set(new.team2);
    active_model.winner = Set(new.winner);

    let model = active_model.update(&txn).await?;

    if old != new {
        standings::revise_match(&txn, &old, &new).await?;
    }

    txn.commit().await?;

    Ok(ApiResponse::updated("Match updated", Match::from(model)))
}
