//! Validation error types
//!
//! A `FieldError` names one rejected field and why. A `ValidationErrors`
//! carries every failure found in one payload, so a client sees all of
//! them in a single 400 response.

use std::fmt;

use thiserror::Error;

use crate::model::Strength;

use super::rules::MIN_DESCRIPTION_CHARS;

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// A single field rule violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    /// Field the rule applies to (`"body"` for whole-payload failures)
    pub field: &'static str,
    /// Client-facing message
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Required key is absent
    pub fn required(field: &'static str) -> Self {
        Self::new(field, format!("{} is required", field))
    }

    /// Key present but not a string (null included)
    pub fn not_a_string(field: &'static str) -> Self {
        Self::new(field, format!("{} must be a string", field))
    }

    /// String is empty once trimmed
    pub fn empty(field: &'static str) -> Self {
        Self::new(field, format!("{} must not be empty", field))
    }

    /// Key present but not an integer
    pub fn not_an_integer(field: &'static str) -> Self {
        Self::new(field, format!("{} must be an integer", field))
    }

    pub fn description_too_short() -> Self {
        Self::new(
            "description",
            format!(
                "description must be present and at least {} characters long",
                MIN_DESCRIPTION_CHARS
            ),
        )
    }

    pub fn invalid_strength() -> Self {
        Self::new(
            "strength",
            format!("strength must be one of: {}", Strength::allowed()),
        )
    }

    /// A foreign key that resolves to no row
    pub fn missing_reference(field: &'static str, id: i64, entity: &str) -> Self {
        Self::new(
            field,
            format!("{} {} does not reference an existing {}", field, id, entity),
        )
    }

    pub fn body_required() -> Self {
        Self::new("body", "Request body is required")
    }

    pub fn body_not_object() -> Self {
        Self::new("body", "Request body must be a JSON object")
    }
}

/// Every rule violation found in one payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Records the failure, if any, and hands back the value on success.
    pub fn collect<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Client-facing messages in the order the failures were found
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Ok when nothing was recorded
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: {}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
