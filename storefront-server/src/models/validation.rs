//! Validation error types

use std::fmt;

/// Maximum length of a product or category name (VARCHAR(100))
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of a description (VARCHAR(255))
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Validation error for request bodies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is missing from the body
    Missing { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Field was sent as null but the column is NOT NULL
    Null { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::Null { field } => write!(f, "{} cannot be null", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a required name column. Only the length is enforced; an empty
/// string is a value like any other.
pub fn name(value: String) -> Result<String, ValidationError> {
    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name",
            max: MAX_NAME_LEN,
        });
    }
    Ok(value)
}

/// Check an optional description column.
pub fn description(value: Option<String>) -> Result<Option<String>, ValidationError> {
    match value {
        Some(text) if text.chars().count() > MAX_DESCRIPTION_LEN => {
            Err(ValidationError::TooLong {
                field: "description",
                max: MAX_DESCRIPTION_LEN,
            })
        }
        other => Ok(other),
    }
}
