use crate::jwt::Claims;
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// One event per request and one per response. Bodies are never logged.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|id| id.to_str().ok())
        .unwrap_or("-")
        .to_owned();
    let user = match request.extensions().get::<Claims>() {
        Some(claims) => format!("{} ({})", claims.user_id, claims.category),
        None => "anonymous".to_owned(),
    };

    info!(%method, %path, %request_id, %user, "request received");

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        error!(
            %method, %path, %request_id, %user, status, elapsed_ms,
            outcome = "server error",
            "response sent"
        );
    } else if response.status().is_client_error() {
        warn!(
            %method, %path, %request_id, %user, status, elapsed_ms,
            outcome = "client error",
            "response sent"
        );
    } else {
        info!(
            %method, %path, %request_id, %user, status, elapsed_ms,
            outcome = "success",
            "response sent"
        );
    }

    response
}
