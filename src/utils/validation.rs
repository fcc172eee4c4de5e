use chrono::NaiveDate;
use entity::{players::PlayerType, users::Role};
use std::borrow::Cow;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const REQUIRED: &str = "This field is required.";

pub fn invalid(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Unwraps a field whose presence `#[validate(required)]` has already checked.
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationErrors> {
    value.ok_or_else(|| {
        let mut errors = ValidationErrors::new();
        errors.add(field, invalid("required", REQUIRED));
        errors
    })
}

/// A primary key in the body that references nothing.
pub fn does_not_exist(pk: i32) -> ValidationError {
    invalid(
        "does_not_exist",
        format!("Invalid pk \"{pk}\" - object does not exist."),
    )
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("blank", "This field may not be blank."));
    }

    Ok(())
}

pub fn username(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;

    let valid = value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));

    if !valid {
        return Err(invalid(
            "invalid",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        ));
    }

    Ok(())
}

/// An empty address means "no e-mail".
pub fn email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_email() {
        return Ok(());
    }

    Err(invalid("invalid", "Enter a valid email address."))
}

pub fn role(value: &str) -> Result<(), ValidationError> {
    value.parse::<Role>().map(|_| ()).map_err(|_| not_a_choice(value))
}

pub fn player_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<PlayerType>()
        .map(|_| ())
        .map_err(|_| not_a_choice(value))
}

pub fn date(value: &str) -> Result<(), ValidationError> {
    parse_date(value).map(|_| ()).ok_or_else(|| {
        invalid(
            "invalid",
            "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.",
        )
    })
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

fn not_a_choice(value: &str) -> ValidationError {
    invalid("invalid_choice", format!("\"{value}\" is not a valid choice."))
}
