use crate::{
    error::{self, Error, Result},
    extractors::ValidatedJson,
    jwt::TokenPair,
    utils::validation::required,
    Json, StateTrait,
};
use axum::extract::State;
use entity::users;
use sea_orm::EntityTrait;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct Request {
    #[validate(required(message = "This field is required."))]
    username: Option<String>,
    #[validate(required(message = "This field is required."))]
    password: Option<String>,
}

pub async fn obtain_token<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<Json<TokenPair>> {
    let username = required(request.username, "username")?;
    let password = required(request.password, "password")?;

    let passwords = state.passwords().clone();

    let Some(user) = users::Entity::find_by_username(&username)
        .one(state.db())
        .await?
    else {
        debug!("login attempt for unknown user {username:?}");
        tokio::task::spawn_blocking(move || passwords.verify_missing(&password))
            .await
            .map_err(Error::internal)?;
        return Err(error::INVALID_CREDENTIALS);
    };

    let hash = user.password.clone();
    let verified = tokio::task::spawn_blocking(move || passwords.verify(&password, &hash))
        .await
        .map_err(Error::internal)?;

    if !verified {
        warn!("wrong password for user {}", user.id);
        return Err(error::INVALID_CREDENTIALS);
    }

    let pair = state
        .jwt()
        .issue_pair(user.id, user.category)
        .map_err(Error::internal)?;

    Ok(Json(pair))
}
