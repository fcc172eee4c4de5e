use super::Team;
use crate::{
    envelope::ApiResponse,
    error::{DatabaseError, Error, Result},
    extractors::ValidatedJson,
    utils::validation::{self, required},
    StateTrait,
};
use axum::extract::State;
use chrono::Utc;
use entity::teams;
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Deserialize, Validate)]
pub struct Request {
    #[validate(
        required(message = "This field is required."),
        custom(function = "validation::not_blank"),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    name: Option<String>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "validation::not_blank"),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    country: Option<String>,
    captain: Option<i32>,
}

pub async fn create_team<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<ApiResponse<Team>> {
    let name = required(request.name, "name")?;
    let country = required(request.country, "country")?;

    let txn = state.db().begin().await?;

    let mut errors = ValidationErrors::new();
    super::check_captain(&txn, &mut errors, request.captain).await?;

    if !errors.is_empty() {
        return Err(Error::validation(errors));
    }

    let team = teams::ActiveModel {
        name: Set(name),
        country: Set(country),
        captain: Set(request.captain),
        matches_played: Set(0),
        wins: Set(0),
        lost: Set(0),
        draw: Set(0),
        points: Set(0),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let team = match team.insert(&txn).await {
        // the captain was deleted after the check
        Err(err) if err.foreign_key_violation() => {
            let captain = request.captain.unwrap_or_default();
            errors.add("captain", validation::does_not_exist(captain));
            return Err(Error::validation(errors));
        }
        r => r?,
    };

    let team = super::represent(&txn, team).await?;

    txn.commit().await?;

    info!("team {} ({}) created", team.id, team.name);

    Ok(ApiResponse::created("Team created", team))
}
