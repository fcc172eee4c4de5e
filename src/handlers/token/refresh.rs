use crate::{
    error::{self, Error, Result},
    extractors::ValidatedJson,
    jwt::TokenType,
    utils::validation::required,
    Json, StateTrait,
};
use axum::extract::State;
use entity::users;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct Request {
    #[validate(required(message = "This field is required."))]
    refresh: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Response {
    access: String,
}

/// The new access token carries the user's current role, not the one the
/// refresh token was issued with.
pub async fn refresh_token<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<Json<Response>> {
    let refresh = required(request.refresh, "refresh")?;

    let claims = state
        .jwt()
        .get_claims(&refresh, TokenType::Refresh)
        .map_err(|error| {
            debug!("rejected refresh token: {error}");
            error::INVALID_TOKEN
        })?;

    let user = users::Entity::find_by_id(claims.user_id)
        .one(state.db())
        .await?
        .ok_or(error::INVALID_TOKEN)?;

    let access = state
        .jwt()
        .issue(user.id, user.category, TokenType::Access)
        .map_err(Error::internal)?;

    Ok(Json(Response { access }))
}
