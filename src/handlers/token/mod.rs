mod obtain;
mod refresh;

use crate::state::StateTrait;
use axum::{routing::post, Router};

/// Routes for token handling, open to anonymous callers
///
/// POST /token          username and password for an access and refresh token
/// POST /token/refresh  refresh token for a new access token
pub fn routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .route("/token", post(obtain::obtain_token::<S>))
        .route("/token/refresh", post(refresh::refresh_token::<S>))
}
