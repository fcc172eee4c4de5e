#![allow(unused_imports)]

pub(crate) use super::macros::*;
pub use super::{App, Token, User, UserLike, PASSWORD};
pub use assert_json_diff::{assert_json_eq, assert_json_include};
pub use cricket_backend::error;
pub use http::StatusCode;
pub use serde_json::{json, Value};
