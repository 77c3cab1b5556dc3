//! Field checks applied to form input before anything reaches the database.

use thiserror::Error;

/// Typed failure for a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Pull a required field out of a form, checking its length in characters.
///
/// `max` of `None` leaves the length unbounded (used for `TEXT` columns).
pub fn required(
    field: &'static str,
    value: Option<String>,
    min: usize,
    max: Option<usize>,
) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    let len = value.chars().count();
    if len == 0 {
        return Err(ValidationError::Missing { field });
    }
    if len < min {
        return Err(ValidationError::TooShort { field, min });
    }
    match max {
        Some(max) if len > max => Err(ValidationError::TooLong { field, max }),
        _ => Ok(value),
    }
}
