use super::{check_references, playing_xi_full, Player, PROFILE_EXISTS, XI_FULL};
use crate::{
    envelope::ApiResponse,
    error::{self, DatabaseError, Error, Result, ALL_FIELDS},
    extractors::Json,
    handlers::parse_id,
    jwt::Claims,
    utils::{set_option, validation},
    StateTrait,
};
use axum::extract::{Path, State};
use entity::users::Role;
use sea_orm::{ActiveModelTrait, IntoActiveModel, TransactionTrait};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Deserialize, Validate)]
pub struct Request {
    user_id: Option<i32>,
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    age: Option<i32>,
    #[serde(rename = "type")]
    #[validate(custom(function = "validation::player_type"))]
    kind: Option<String>,
    team: Option<i32>,
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    matches_played: Option<i32>,
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    total_runs: Option<i32>,
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    wickets: Option<i32>,
    is_playing: Option<bool>,
}

impl Request {
    fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.age.is_none()
            && self.kind.is_none()
            && self.team.is_none()
            && self.matches_played.is_none()
            && self.total_runs.is_none()
            && self.wickets.is_none()
            && self.is_playing.is_none()
    }
}

pub async fn update_player<S: StateTrait>(
    State(state): State<S>,
    claims: Claims,
    Path(id): Path<String>,
    Json(request): Json<Request>,
) -> Result<ApiResponse<Player>> {
    let id = parse_id(&id, error::PLAYER_NOT_FOUND)?;

    let txn = state.db().begin().await?;

    let player = super::find_player(&txn, id).await?;

    if claims.category == Role::Player && player.user_id != claims.user_id {
        warn!(
            "user {} tried to update the profile of user {}",
            claims.user_id, player.user_id
        );
        return Err(error::UNAUTHORIZED);
    }

    request.validate()?;

    let mut errors = ValidationErrors::new();
    check_references(&txn, &mut errors, request.user_id, request.team, Some(player.id)).await?;

    if !errors.is_empty() {
        return Err(Error::validation(errors));
    }

    let team = request.team.unwrap_or(player.team);
    let is_playing = request.is_playing.unwrap_or(player.is_playing);

    if is_playing && playing_xi_full(&txn, team, Some(player.id)).await? {
        errors.add(ALL_FIELDS, validation::invalid("playing_xi", XI_FULL));
        return Err(Error::validation(errors));
    }

    // an update without columns is not valid sql
    let player = if request.is_empty() {
        player
    } else {
        let mut active_model = player.into_active_model();
        active_model.user_id = set_option(request.user_id);
        active_model.age = set_option(request.age);
        active_model.kind = set_option(request.kind.and_then(|kind| kind.parse().ok()));
        active_model.team = set_option(request.team);
        active_model.matches_played = set_option(request.matches_played);
        active_model.total_runs = set_option(request.total_runs);
        active_model.wickets = set_option(request.wickets);
        active_model.is_playing = set_option(request.is_playing);

        match active_model.update(&txn).await {
            Err(err) if err.unique_violation() => {
                errors.add("user_id", validation::invalid("unique", PROFILE_EXISTS));
                return Err(Error::validation(errors));
            }
            r => r?,
        }
    };

    let player = super::represent(&txn, player).await?;

    txn.commit().await?;

    Ok(ApiResponse::updated("Player updated", player))
}
