mod constants;
mod db;

pub use constants::*;
pub use db::*;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::{BufMut, Bytes, BytesMut};
use entity::users::Role;
use sea_orm::DbErr;
use serde_json::{json, Map, Value};
use std::{borrow::Cow, fmt};
use validator::{ValidationError, ValidationErrors};

/// Field key for errors that concern the whole object.
pub const ALL_FIELDS: &str = "__all__";

/// Field key for request bodies that could not be decoded at all.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

#[derive(Debug, Clone)]
pub struct Error {
    status: StatusCode,
    message: Cow<'static, str>,
    data: Option<Value>,
}

pub type Result<T = ()> = std::result::Result<T, Error>;

impl Error {
    #[inline]
    const fn new(status: StatusCode, message: &'static str) -> Self {
        Self {
            status,
            message: Cow::Borrowed(message),
            data: None,
        }
    }

    #[inline]
    pub fn internal<E: fmt::Debug>(error: E) -> Self {
        error!("internal error: {:?}", error);
        constants::INTERNAL
    }

    /// 400 with a `field -> [messages]` map as data.
    pub fn validation(errors: ValidationErrors) -> Self {
        let mut fields = Map::new();

        for (field, errors) in errors.field_errors() {
            let messages = errors.iter().map(describe).map(Value::String).collect();
            fields.insert(field.to_string(), Value::Array(messages));
        }

        Self {
            status: StatusCode::BAD_REQUEST,
            message: Cow::Borrowed("Validation failed"),
            data: Some(Value::Object(fields)),
        }
    }

    /// 400 for a single message that belongs to no particular field.
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(NON_FIELD_ERRORS.to_owned(), json!([message.into()]));

        Self {
            status: StatusCode::BAD_REQUEST,
            message: Cow::Borrowed("Validation failed"),
            data: Some(Value::Object(fields)),
        }
    }

    pub fn permission_denied(role: Role, allowed: &[Role]) -> Self {
        let allowed = allowed
            .iter()
            .map(|role| format!("'{role}'"))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            status: StatusCode::FORBIDDEN,
            message: Cow::Owned(format!(
                "Permission denied. Your role '{role}' is not in [{allowed}]."
            )),
            data: None,
        }
    }

    #[inline]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub const fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(128).writer();

        let body = json!({
            "code": self.status.as_str(),
            "data": self.data.clone().unwrap_or_else(|| json!({})),
            "message": self.message(),
        });

        if let Err(error) = serde_json::to_writer(&mut buf, &body) {
            error!("failed to serialize error: {:?}", error);
        }

        buf.into_inner().freeze()
    }
}

fn describe(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => error.code.to_string(),
    }
}

impl IntoResponse for Error {
    #[inline]
    fn into_response(self) -> Response {
        let buf = self.to_bytes();
        let mut res = (self.status, buf).into_response();

        res.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(mime::APPLICATION_JSON.as_ref()),
        );

        res
    }
}

impl From<DbErr> for Error {
    #[inline]
    fn from(error: DbErr) -> Self {
        error!("database error: {:?}", error);
        constants::DATABASE_ERROR
    }
}

impl From<ValidationErrors> for Error {
    #[inline]
    fn from(errors: ValidationErrors) -> Self {
        Self::validation(errors)
    }
}

macro_rules! const_error {
    ($name:ident, $status:ident, $msg:literal $(,)?) => {
        pub const $name: $crate::error::Error =
            $crate::error::Error::new(::axum::http::StatusCode::$status, $msg);
    };
}

#[allow(clippy::useless_attribute)]
#[allow(clippy::needless_pub_self)]
pub(self) use const_error;
