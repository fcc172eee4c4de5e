mod claims;
mod logging;
mod roles;

use crate::StateTrait;
use axum::{http::header::AUTHORIZATION, middleware, Router};
pub use roles::*;
use std::iter;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    ServiceBuilderExt,
};

pub fn middlewares<S: StateTrait>(state: S, router: Router<S>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let middlewares = ServiceBuilder::new()
        .catch_panic()
        .sensitive_headers(iter::once(AUTHORIZATION))
        .set_x_request_id(MakeRequestUuid)
        .propagate_x_request_id()
        .compression()
        .decompression()
        .layer(cors_layer)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            claims::get_claims::<S>,
        ))
        .layer(middleware::from_fn(logging::log_requests))
        .into_inner();

    router.layer(middlewares).with_state(state)
}
