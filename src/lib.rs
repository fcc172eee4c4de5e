#[macro_use]
extern crate tracing;

pub mod config;
mod envelope;
pub mod error;
mod extractors;
mod handlers;
pub mod jwt;
mod middlewares;
pub mod password;
pub mod standings;
mod state;
mod utils;

use crate::{middlewares::middlewares, utils::SignalHandler};
use axum::{extract::Request, ServiceExt};
pub use config::{Config, HashingCost};
use error::{Error, Result};
use extractors::Json;
pub use state::*;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
pub use utils::panic;

pub async fn run<S: StateTrait>(listener: TcpListener, state: S) -> anyhow::Result<()> {
    info!("listening on {}", listener.local_addr()?);

    let routes = handlers::routes::<S>();
    let app = NormalizePathLayer::trim_trailing_slash().layer(middlewares(state, routes));

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(SignalHandler::new())
        .await?;

    Ok(())
}
