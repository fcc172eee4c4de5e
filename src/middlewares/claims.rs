use crate::{jwt::TokenType, StateTrait};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use headers::{authorization::Bearer, Authorization, HeaderMapExt};
use tracing::Instrument;

/// Puts the claims of a valid access token into the request extensions.
/// Requests without one pass through untouched.
pub async fn get_claims<S: StateTrait>(
    State(state): State<S>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(header) = request.headers().typed_get::<Authorization<Bearer>>() else {
        return next.run(request).await;
    };

    let claims = match state.jwt().get_claims(header.token(), TokenType::Access) {
        Ok(claims) => claims,
        Err(error) => {
            debug!("rejected bearer token: {error}");
            return next.run(request).await;
        }
    };

    let span = info_span!("claims", user_id = claims.user_id);

    request.extensions_mut().insert(claims);

    next.run(request).instrument(span).await
}
