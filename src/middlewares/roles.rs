use crate::{error, jwt::Claims, Error};
use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use entity::users::Role;
use futures::{future::BoxFuture, Future};
use std::{
    convert::Infallible,
    task::{Context, Poll},
};
use tower::{Layer, Service};

type RoleList = &'static [Role];

pub const EVERYONE: RoleList = Role::ALL;
pub const STAFF: RoleList = &[Role::Admin, Role::Organiser, Role::Captain];
pub const ORGANISERS: RoleList = &[Role::Admin, Role::Organiser];

/// Lets a request through only if its access token carries one of the
/// given roles. Attached per method handler.
#[derive(Debug, Clone, Copy)]
pub struct RolesLayer {
    roles: RoleList,
}

impl RolesLayer {
    pub const fn new(roles: RoleList) -> Self {
        Self { roles }
    }
}

impl<S> Layer<S> for RolesLayer {
    type Service = Roles<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Roles::new(inner, self.roles)
    }
}

#[derive(Debug, Clone)]
pub struct Roles<S> {
    inner: S,
    roles: RoleList,
}

impl<S> Roles<S> {
    fn new(inner: S, roles: RoleList) -> Self {
        Roles { inner, roles }
    }
}

impl<S> Service<Request> for Roles<S>
where
    S: Service<Request, Error = Infallible, Response = Response> + Send,
    S::Future: Future + Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let Some(claims) = req.extensions().get::<Claims>() else {
            return Box::pin(async { Ok(error::NOT_AUTHENTICATED.into_response()) });
        };

        if !self.roles.contains(&claims.category) {
            warn!(
                user_id = claims.user_id,
                "role {} is not allowed to {} {}",
                claims.category,
                req.method(),
                req.uri().path()
            );

            let error = Error::permission_denied(claims.category, self.roles);
            return Box::pin(async move { Ok(error.into_response()) });
        }

        Box::pin(self.inner.call(req))
    }
}
