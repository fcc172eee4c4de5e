use super::{check_references, playing_xi_full, Player, PROFILE_EXISTS, XI_FULL};
use crate::{
    envelope::ApiResponse,
    error::{DatabaseError, Error, Result, ALL_FIELDS},
    extractors::ValidatedJson,
    utils::validation::{self, required},
    StateTrait,
};
use axum::extract::State;
use entity::players::{self, PlayerType};
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Deserialize, Validate)]
pub struct Request {
    #[validate(required(message = "This field is required."))]
    user_id: Option<i32>,
    #[validate(
        required(message = "This field is required."),
        range(min = 0, message = "Ensure this value is greater than or equal to 0.")
    )]
    age: Option<i32>,
    #[serde(rename = "type")]
    #[validate(custom(function = "validation::player_type"))]
    kind: Option<String>,
    #[validate(required(message = "This field is required."))]
    team: Option<i32>,
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    matches_played: Option<i32>,
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    total_runs: Option<i32>,
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    wickets: Option<i32>,
    is_playing: Option<bool>,
}

pub async fn create_player<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<ApiResponse<Player>> {
    let user_id = required(request.user_id, "user_id")?;
    let age = required(request.age, "age")?;
    let team = required(request.team, "team")?;
    let kind = match request.kind.as_deref() {
        Some(kind) => kind.parse().unwrap_or_default(),
        None => PlayerType::default(),
    };
    let is_playing = request.is_playing.unwrap_or(false);

    let txn = state.db().begin().await?;

    let mut errors = ValidationErrors::new();
    check_references(&txn, &mut errors, Some(user_id), Some(team), None).await?;

    if !errors.is_empty() {
        return Err(Error::validation(errors));
    }

    if is_playing && playing_xi_full(&txn, team, None).await? {
        errors.add(ALL_FIELDS, validation::invalid("playing_xi", XI_FULL));
        return Err(Error::validation(errors));
    }

    let player = players::ActiveModel {
        user_id: Set(user_id),
        age: Set(age),
        kind: Set(kind),
        team: Set(team),
        matches_played: Set(request.matches_played.unwrap_or(0)),
        total_runs: Set(request.total_runs.unwrap_or(0)),
        wickets: Set(request.wickets.unwrap_or(0)),
        is_playing: Set(is_playing),
        ..Default::default()
    };

    let player = match player.insert(&txn).await {
        Err(err) if err.unique_violation() => {
            errors.add("user_id", validation::invalid("unique", PROFILE_EXISTS));
            return Err(Error::validation(errors));
        }
        Err(err) if err.foreign_key_violation() => {
            errors.add("team", validation::does_not_exist(team));
            return Err(Error::validation(errors));
        }
        r => r?,
    };

    let player = super::represent(&txn, player).await?;

    txn.commit().await?;

    info!("player profile {} created for user {}", player.id, user_id);

    Ok(ApiResponse::created("Player created", player))
}
