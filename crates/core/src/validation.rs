//! Field-level validation rules for the product form.
//!
//! Rules run in order and the first failure wins. A field that has not been
//! activated never reports an error.

use thiserror::Error;

use crate::draft::{Draft, Field};

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 50;
pub const CATEGORY_MIN_LEN: usize = 3;
pub const CATEGORY_MAX_LEN: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} can't be empty")]
    Empty(Field),

    #[error("{field} must be at least {min} characters.")]
    TooShort { field: Field, min: usize },

    #[error("{field} cannot exceed {max} characters.")]
    TooLong { field: Field, max: usize },

    #[error("{0} can only contain letters, numbers, spaces, or dashes.")]
    InvalidCharacters(Field),

    #[error("Valid product quantity is required")]
    QuantityRequired,

    #[error("Quantity must be a valid integer.")]
    QuantityNotInteger,

    #[error("Quantity must be a non-negative number.")]
    QuantityNegative,
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            Self::Empty(field) | Self::InvalidCharacters(field) => *field,
            Self::TooShort { field, .. } | Self::TooLong { field, .. } => *field,
            Self::QuantityRequired | Self::QuantityNotInteger | Self::QuantityNegative => {
                Field::Quantity
            }
        }
    }
}

/// Evaluates the rules for `field` against the current draft.
pub fn validate(field: Field, draft: &Draft) -> Option<ValidationError> {
    if !draft.is_activated(field) {
        return None;
    }
    let text = draft.text(field);
    match field {
        Field::Name => check_text(field, text, NAME_MIN_LEN, NAME_MAX_LEN).err(),
        Field::Category => check_text(field, text, CATEGORY_MIN_LEN, CATEGORY_MAX_LEN).err(),
        Field::Quantity => parse_quantity(text).err(),
    }
}

/// Validates every field as if the operator had touched it. Returns the first
/// failure in field order.
pub fn validate_for_commit(draft: &Draft) -> Result<(), ValidationError> {
    let draft = draft.activated();
    match Field::ALL.into_iter().find_map(|field| validate(field, &draft)) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Parses raw quantity text into a non-negative count.
pub fn parse_quantity(text: &str) -> Result<u32, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::QuantityRequired);
    }
    let value: i32 = text.parse().map_err(|_| ValidationError::QuantityNotInteger)?;
    u32::try_from(value).map_err(|_| ValidationError::QuantityNegative)
}

fn check_text(field: Field, text: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    let len = text.chars().count();
    if len < min {
        return Err(ValidationError::TooShort { field, min });
    }
    if len > max {
        return Err(ValidationError::TooLong { field, max });
    }
    if !text.chars().all(is_allowed_char) {
        return Err(ValidationError::InvalidCharacters(field));
    }
    Ok(())
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || c == '-'
}
