use super::Team;
use crate::{
    envelope::ApiResponse,
    error::{self, DatabaseError, Error, Result},
    extractors::Json,
    handlers::parse_id,
    utils::{set_option, validation},
    StateTrait,
};
use axum::extract::{Path, State};
use sea_orm::{ActiveModelTrait, IntoActiveModel, TransactionTrait};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Deserialize, Validate)]
pub struct Request {
    #[validate(
        custom(function = "validation::not_blank"),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    name: Option<String>,
    #[validate(
        custom(function = "validation::not_blank"),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    country: Option<String>,
    /// `null` removes the captain, a missing key keeps it.
    #[serde(default, with = "::serde_with::rust::double_option")]
    captain: Option<Option<i32>>,
}

pub async fn update_team<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
    Json(request): Json<Request>,
) -> Result<ApiResponse<Team>> {
    let id = parse_id(&id, error::TEAM_NOT_FOUND)?;

    let txn = state.db().begin().await?;

    let team = super::find_team(&txn, id).await?;

    request.validate()?;

    let mut errors = ValidationErrors::new();
    super::check_captain(&txn, &mut errors, request.captain.flatten()).await?;

    if !errors.is_empty() {
        return Err(Error::validation(errors));
    }

    // without this the ORM would generate an invalid sql statement
    let team = if request.name.is_none() && request.country.is_none() && request.captain.is_none()
    {
        team
    } else {
        let mut active_model = team.into_active_model();
        active_model.name = set_option(request.name);
        active_model.country = set_option(request.country);
        active_model.captain = set_option(request.captain);

        match active_model.update(&txn).await {
            // the captain was deleted after the check
            Err(err) if err.foreign_key_violation() => {
                let captain = request.captain.flatten().unwrap_or_default();
                errors.add("captain", validation::does_not_exist(captain));
                return Err(Error::validation(errors));
            }
            r => r?,
        }
    };

    let team = super::represent(&txn, team).await?;

    txn.commit().await?;

    Ok(ApiResponse::updated("Team updated", team))
}
