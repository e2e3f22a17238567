//! Client-side checks mirroring the backend's payload validation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MIN_NAME_CHARS: usize = 3;
pub const MAX_NAME_CHARS: usize = 30;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern must compile")
});

static HTTPS_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https://[^\s/]+\S*$").expect("url pattern must compile"));

/// Payload validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    BlankField(&'static str),
    LengthOutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },
    InsecureUrl(String),
    InvalidEmail(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} cannot contain only whitespace"),
            Self::LengthOutOfRange {
                field,
                min,
                max,
                actual,
            } => write!(
                f,
                "{field} must be between {min} and {max} characters, got {actual}"
            ),
            Self::InsecureUrl(value) => write!(f, "url must be https: {value}"),
            Self::InvalidEmail(value) => write!(f, "email is invalid: {value}"),
        }
    }
}

impl Error for ValidationError {}

/// Checks a display name: not blank, 3..=30 characters.
pub fn validate_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    let actual = value.chars().count();
    if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&actual) {
        return Err(ValidationError::LengthOutOfRange {
            field,
            min: MIN_NAME_CHARS,
            max: MAX_NAME_CHARS,
            actual,
        });
    }
    Ok(())
}

pub fn validate_https_url(value: &str) -> Result<(), ValidationError> {
    if HTTPS_URL_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InsecureUrl(value.to_string()))
    }
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if EMAIL_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(value.to_string()))
    }
}
