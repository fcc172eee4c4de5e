use super::Match;
use crate::{
    envelope::ApiResponse,
    error::{Error, Result},
    extractors::ValidatedJson,
    standings::{self, Fixture},
    utils::validation::{self, required},
    StateTrait,
};
use axum::extract::State;
use entity::matches;
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Deserialize, Validate)]
pub struct Request {
    #[validate(
        required(message = "This field is required."),
        custom(function = "validation::date")
    )]
    date: Option<String>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "validation::not_blank"),
        length(max = 200, message = "Ensure this field has no more than 200 characters.")
    )]
    venue: Option<String>,
    #[validate(required(message = "This field is required."))]
    team1: Option<i32>,
    #[validate(required(message = "This field is required."))]
    team2: Option<i32>,
    winner: Option<i32>,
}

pub async fn create_match<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<ApiResponse<Match>> {
    let date = required(request.date.as_deref().and_then(validation::parse_date), "date")?;
    let venue = required(request.venue, "venue")?;
    let fixture = Fixture {
        team1: required(request.team1, "team1")?,
        team2: required(request.team2, "team2")?,
        winner: request.winner,
    };

    let txn = state.db().begin().await?;

    let mut errors = ValidationErrors::new();
    super::check_fixture(&txn, &mut errors, &fixture).await?;

    if !errors.is_empty() {
        return Err(Error::validation(errors));
    }

    let model = matches::ActiveModel {
        date: Set(date),
        venue: Set(venue),
        team1: Set(fixture.team1),
        team2: Set(fixture.team2),
        winner: Set(fixture.winner),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    standings::record_match(&txn, &fixture).await?;

    txn.commit().await?;

    info!(
        "match {} recorded: {} vs {}, winner {:?}",
        model.id, fixture.team1, fixture.team2, fixture.winner
    );

    Ok(ApiResponse::created("Match created", Match::from(model)))
}
