use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use std::borrow::Cow;

/// Serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Empty {}

/// The `{code, data, message}` body every non-list endpoint answers with.
#[derive(Debug)]
pub struct ApiResponse<T = Empty> {
    status: StatusCode,
    message: Cow<'static, str>,
    data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, "Success", data)
    }

    pub fn created(message: &'static str, data: T) -> Self {
        Self::new(StatusCode::CREATED, message, data)
    }

    pub fn updated(message: &'static str, data: T) -> Self {
        Self::new(StatusCode::OK, message, data)
    }

    fn new(status: StatusCode, message: &'static str, data: T) -> Self {
        Self {
            status,
            message: Cow::Borrowed(message),
            data,
        }
    }
}

impl ApiResponse {
    pub fn message(message: &'static str) -> Self {
        Self::new(StatusCode::OK, message, Empty {})
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = json!({
            "code": self.status.as_str(),
            "data": self.data,
            "message": self.message,
        });

        (self.status, axum::Json(body)).into_response()
    }
}

/// A page of a collection. Not wrapped in the envelope.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}
