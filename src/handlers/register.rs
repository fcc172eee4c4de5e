use crate::{
    envelope::ApiResponse,
    error::{DatabaseError, Error, Result},
    extractors::Json,
    password,
    state::StateTrait,
    utils::validation,
};
use axum::{extract::State, routing::post, Router};
use chrono::Utc;
use entity::users::{self, Role};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

pub fn routes<S: StateTrait>() -> Router<S> {
    Router::new().route("/register", post(register::<S>))
}

const USERNAME_TAKEN: &str = "A user with that username already exists.";

#[derive(Debug, Deserialize, Validate)]
pub struct Request {
    #[validate(
        required(message = "This field is required."),
        length(max = 150, message = "Ensure this field has no more than 150 characters."),
        custom(function = "validation::username")
    )]
    username: Option<String>,
    #[validate(required(message = "This field is required."))]
    password: Option<String>,
    #[validate(required(message = "This field is required."))]
    password2: Option<String>,
    #[validate(
        length(max = 254, message = "Ensure this field has no more than 254 characters."),
        custom(function = "validation::email")
    )]
    email: Option<String>,
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    first_name: Option<String>,
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    last_name: Option<String>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "validation::role")
    )]
    category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Response {
    id: i32,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    category: Role,
}

pub async fn register<S: StateTrait>(
    State(state): State<S>,
    Json(request): Json<Request>,
) -> Result<ApiResponse<Response>> {
    let mut errors = match request.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    if let (Some(password), Some(password2)) = (&request.password, &request.password2) {
        if password != password2 {
            errors.add(
                "password",
                validation::invalid("mismatch", "Password fields didn't match."),
            );
        } else {
            let username = request.username.as_deref().unwrap_or_default();

            for violation in password::policy_violations(password, username) {
                errors.add("password", validation::invalid("weak", violation));
            }
        }
    }

    if let Some(username) = &request.username {
        let taken = users::Entity::find_by_username(username)
            .one(state.db())
            .await?
            .is_some();

        if taken {
            errors.add("username", validation::invalid("unique", USERNAME_TAKEN));
        }
    }

    if !errors.is_empty() {
        return Err(Error::validation(errors));
    }

    let username = validation::required(request.username, "username")?;
    let password = validation::required(request.password, "password")?;
    let category = validation::required(request.category, "category")?
        .parse::<Role>()
        .map_err(Error::internal)?;

    let passwords = state.passwords().clone();
    let hash = tokio::task::spawn_blocking(move || passwords.hash(&password))
        .await
        .map_err(Error::internal)?
        .map_err(Error::internal)?;

    let user = users::ActiveModel {
        username: Set(username),
        email: Set(request.email.unwrap_or_default()),
        first_name: Set(request.first_name.unwrap_or_default()),
        last_name: Set(request.last_name.unwrap_or_default()),
        password: Set(hash),
        category: Set(category),
        date_joined: Set(Utc::now()),
        ..Default::default()
    };

    let user = match user.insert(state.db()).await {
        Err(err) if err.unique_violation() => {
            let mut errors = ValidationErrors::new();
            errors.add("username", validation::invalid("unique", USERNAME_TAKEN));
            return Err(Error::validation(errors));
        }
        r => r?,
    };

    info!("user {} registered as {}", user.id, user.category);

    Ok(ApiResponse::created(
        "User registered",
        Response {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            category: user.category,
        },
    ))
}
