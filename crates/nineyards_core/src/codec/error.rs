//! Codec error types.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure to turn a wire object into a typed entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    NotAnObject {
        entity: &'static str,
    },
    MissingRequiredField {
        entity: &'static str,
        field: &'static str,
    },
    InvalidFieldType {
        entity: &'static str,
        field: &'static str,
        expected: &'static str,
    },
    MalformedDate {
        entity: &'static str,
        field: &'static str,
        raw: String,
    },
    UnknownField {
        entity: &'static str,
        key: String,
    },
    /// One element of an array failed. `field` is `None` for top-level lists.
    InElement {
        entity: &'static str,
        field: Option<&'static str>,
        index: usize,
        source: Box<DecodeError>,
    },
    /// The checked in-memory object did not fit the typed record.
    Shape {
        entity: &'static str,
        message: String,
    },
}

impl DecodeError {
    /// Stable code used in log lines.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotAnObject { .. } => "not_an_object",
            Self::MissingRequiredField { .. } => "missing_field",
            Self::InvalidFieldType { .. } => "invalid_type",
            Self::MalformedDate { .. } => "malformed_date",
            Self::UnknownField { .. } => "unknown_field",
            Self::InElement { .. } => "element_failed",
            Self::Shape { .. } => "shape_mismatch",
        }
    }

    /// Follows `InElement` wrappers down to the failing field.
    pub fn innermost(&self) -> &DecodeError {
        match self {
            Self::InElement { source, .. } => source.innermost(),
            other => other,
        }
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject { entity } => write!(f, "{entity}: expected a JSON object"),
            Self::MissingRequiredField { entity, field } => {
                write!(f, "{entity}: missing required field `{field}`")
            }
            Self::InvalidFieldType {
                entity,
                field,
                expected,
            } => write!(f, "{entity}: field `{field}` must be a {expected}"),
            Self::MalformedDate { entity, field, raw } => {
                write!(f, "{entity}: field `{field}` is not a valid ISO-8601 date: {raw}")
            }
            Self::UnknownField { entity, key } => write!(f, "{entity}: unknown field `{key}`"),
            Self::InElement {
                entity,
                field: Some(field),
                index,
                source,
            } => write!(f, "{entity}: element {index} of `{field}`: {source}"),
            Self::InElement {
                entity,
                field: None,
                index,
                source,
            } => write!(f, "{entity} list: element {index}: {source}"),
            Self::Shape { entity, message } => write!(f, "{entity}: {message}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InElement { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Failure to turn a typed entity back into its wire object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    Serialize {
        entity: &'static str,
        message: String,
    },
    NotAnObject {
        entity: &'static str,
    },
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    /// The typed record produced a key its field table does not declare.
    UnmappedField {
        entity: &'static str,
        key: String,
    },
    MalformedDate {
        entity: &'static str,
        field: &'static str,
        raw: String,
    },
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize { entity, message } => {
                write!(f, "{entity}: serialization failed: {message}")
            }
            Self::NotAnObject { entity } => write!(f, "{entity}: record did not serialize to an object"),
            Self::MissingField { entity, field } => {
                write!(f, "{entity}: record is missing required field `{field}`")
            }
            Self::UnmappedField { entity, key } => {
                write!(f, "{entity}: record field `{key}` has no wire mapping")
            }
            Self::MalformedDate { entity, field, raw } => {
                write!(f, "{entity}: field `{field}` holds an invalid date: {raw}")
            }
        }
    }
}

impl Error for EncodeError {}
