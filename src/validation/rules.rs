//! Field rules
//!
//! Each rule takes the raw JSON value supplied for a field and returns
//! either the normalized value or a `FieldError`. Rules never touch the
//! store; the reference rule is handed the lookup result by its caller.

use serde_json::{Map, Value};

use crate::model::Strength;

use super::errors::FieldError;

/// Minimum power description length, in characters, after trimming
pub const MIN_DESCRIPTION_CHARS: usize = 20;

/// Looks up a key that must be present.
pub fn required<'a>(body: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, FieldError> {
    body.get(field).ok_or_else(|| FieldError::required(field))
}

/// Trimmed string that must not be empty.
///
/// Applies to hero `name`, hero `super_name` and power `name`.
pub fn text(field: &'static str, value: &Value) -> Result<String, FieldError> {
    let raw = value.as_str().ok_or_else(|| FieldError::not_a_string(field))?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::empty(field));
    }
    Ok(trimmed.to_string())
}

/// Trimmed power description of at least `MIN_DESCRIPTION_CHARS` characters.
pub fn description(value: &Value) -> Result<String, FieldError> {
    let raw = value
        .as_str()
        .ok_or_else(|| FieldError::not_a_string("description"))?;
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(FieldError::description_too_short());
    }
    Ok(trimmed.to_string())
}

/// One of the strength enumerants, matched exactly.
pub fn strength(value: &Value) -> Result<Strength, FieldError> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .ok_or_else(FieldError::invalid_strength)
}

/// An integer id; floats, strings and null are rejected.
pub fn integer_id(field: &'static str, value: &Value) -> Result<i64, FieldError> {
    value.as_i64().ok_or_else(|| FieldError::not_an_integer(field))
}

/// A foreign key must resolve to an existing row.
pub fn reference(field: &'static str, id: i64, entity: &str, exists: bool) -> Result<(), FieldError> {
    if exists {
        Ok(())
    } else {
        Err(FieldError::missing_reference(field, id, entity))
    }
}
