//! Create and patch payloads
//!
//! Request bodies arrive as JSON objects. Create payloads require every
//! field; patch payloads validate only the keys that are present. Any
//! invalid field rejects the whole payload, so nothing is applied in part.

use serde_json::{Map, Value};

use crate::model::Strength;

use super::errors::{FieldError, ValidationErrors, ValidationResult};
use super::rules;

/// Body of a create or patch request
pub type Body = Map<String, Value>;

/// Unwraps a parsed request body into its top-level object.
pub fn object_body(value: Value) -> ValidationResult<Body> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(FieldError::body_required().into()),
        _ => Err(FieldError::body_not_object().into()),
    }
}

/// Validated `POST /heroes` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHero {
    pub name: String,
    pub super_name: String,
}

impl NewHero {
    pub fn from_body(body: &Body) -> ValidationResult<Self> {
        let mut errors = ValidationErrors::new();
        let name = errors.collect(rules::required(body, "name").and_then(|v| rules::text("name", v)));
        let super_name = errors.collect(
            rules::required(body, "super_name").and_then(|v| rules::text("super_name", v)),
        );

        match (name, super_name) {
            (Some(name), Some(super_name)) => Ok(Self { name, super_name }),
            _ => Err(errors),
        }
    }
}

/// Validated `PATCH /heroes/{id}` body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroPatch {
    pub name: Option<String>,
    pub super_name: Option<String>,
}

impl HeroPatch {
    pub fn from_body(body: &Body) -> ValidationResult<Self> {
        let mut errors = ValidationErrors::new();
        let mut patch = Self::default();

        if let Some(value) = body.get("name") {
            patch.name = errors.collect(rules::text("name", value));
        }
        if let Some(value) = body.get("super_name") {
            patch.super_name = errors.collect(rules::text("super_name", value));
        }

        errors.into_result()?;
        Ok(patch)
    }

    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.super_name.is_none()
    }
}

/// Validated `POST /powers` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPower {
    pub name: String,
    pub description: String,
}

impl NewPower {
    pub fn from_body(body: &Body) -> ValidationResult<Self> {
        let mut errors = ValidationErrors::new();
        let name = errors.collect(rules::required(body, "name").and_then(|v| rules::text("name", v)));
        let description = errors.collect(
            rules::required(body, "description")
                .map_err(|_| FieldError::description_too_short())
                .and_then(rules::description),
        );

        match (name, description) {
            (Some(name), Some(description)) => Ok(Self { name, description }),
            _ => Err(errors),
        }
    }
}

/// Validated `PATCH /powers/{id}` body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl PowerPatch {
    pub fn from_body(body: &Body) -> ValidationResult<Self> {
        let mut errors = ValidationErrors::new();
        let mut patch = Self::default();

        if let Some(value) = body.get("name") {
            patch.name = errors.collect(rules::text("name", value));
        }
        if let Some(value) = body.get("description") {
            patch.description = errors.collect(rules::description(value));
        }

        errors.into_result()?;
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Validated `POST /hero_powers` body.
///
/// Only shape is checked here; whether `hero_id` and `power_id` resolve is
/// decided by the store inside the create transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHeroPower {
    pub strength: Strength,
    pub hero_id: i64,
    pub power_id: i64,
}

impl NewHeroPower {
    pub fn from_body(body: &Body) -> ValidationResult<Self> {
        let mut errors = ValidationErrors::new();
        let strength = errors.collect(rules::required(body, "strength").and_then(rules::strength));
        let hero_id = errors.collect(
            rules::required(body, "hero_id").and_then(|v| rules::integer_id("hero_id", v)),
        );
        let power_id = errors.collect(
            rules::required(body, "power_id").and_then(|v| rules::integer_id("power_id", v)),
        );

        match (strength, hero_id, power_id) {
            (Some(strength), Some(hero_id), Some(power_id)) => Ok(Self {
                strength,
                hero_id,
                power_id,
            }),
            _ => Err(errors),
        }
    }
}

/// Validated `PATCH /hero_powers/{id}` body. Only `strength` is mutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroPowerPatch {
    pub strength: Option<Strength>,
}

impl HeroPowerPatch {
    pub fn from_body(body: &Body) -> ValidationResult<Self> {
        match body.get("strength") {
            Some(value) => Ok(Self {
                strength: Some(rules::strength(value)?),
            }),
            None => Ok(Self::default()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.strength.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Body {
        object_body(value).unwrap()
    }

    #[test]
    fn test_object_body() {
        assert!(object_body(json!({})).is_ok());
        assert_eq!(
            object_body(json!(null)).unwrap_err().messages(),
            vec!["Request body is required"]
        );
        assert_eq!(
            object_body(json!([1, 2])).unwrap_err().messages(),
            vec!["Request body must be a JSON object"]
        );
    }

    #[test]
    fn test_new_hero_normalizes() {
        let hero = NewHero::from_body(&body(json!({
            "name": " Kamala Khan ",
            "super_name": "Ms. Marvel"
        })))
        .unwrap();
        assert_eq!(hero.name, "Kamala Khan");
        assert_eq!(hero.super_name, "Ms. Marvel");
    }

    #[test]
    fn test_new_hero_reports_every_field() {
        let err = NewHero::from_body(&body(json!({"name": ""}))).unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["name must not be empty", "super_name is required"]
        );
    }

    #[test]
    fn test_hero_patch_only_supplied_keys() {
        let patch = HeroPatch::from_body(&body(json!({"super_name": "Storm"}))).unwrap();
        assert_eq!(patch.name, None);
        assert_eq!(patch.super_name.as_deref(), Some("Storm"));

        let empty = HeroPatch::from_body(&body(json!({"unrelated": 1}))).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_hero_patch_rejects_whole_payload() {
        let err = HeroPatch::from_body(&body(json!({"name": "Ororo", "super_name": "  "})))
            .unwrap_err();
        assert_eq!(err.messages(), vec!["super_name must not be empty"]);

        let err = HeroPatch::from_body(&body(json!({"name": null}))).unwrap_err();
        assert_eq!(err.messages(), vec!["name must be a string"]);
    }

    #[test]
    fn test_new_power_short_description() {
        let err = NewPower::from_body(&body(json!({"name": "x", "description": "short"})))
            .unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["description must be present and at least 20 characters long"]
        );

        let err = NewPower::from_body(&body(json!({"name": "x"}))).unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["description must be present and at least 20 characters long"]
        );
    }

    #[test]
    fn test_power_patch_revalidates_description() {
        let err = PowerPatch::from_body(&body(json!({"description": "Too short"}))).unwrap_err();
        assert_eq!(err.len(), 1);

        let patch = PowerPatch::from_body(&body(json!({
            "description": "can stretch the human body to extreme lengths"
        })))
        .unwrap();
        assert!(patch.name.is_none());
        assert!(patch.description.is_some());
    }

    #[test]
    fn test_new_hero_power() {
        let link = NewHeroPower::from_body(&body(json!({
            "strength": "Average",
            "hero_id": 1,
            "power_id": 2
        })))
        .unwrap();
        assert_eq!(
            link,
            NewHeroPower {
                strength: Strength::Average,
                hero_id: 1,
                power_id: 2
            }
        );
    }

    #[test]
    fn test_new_hero_power_missing_and_malformed() {
        let err = NewHeroPower::from_body(&body(json!({"strength": "Strong"}))).unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["hero_id is required", "power_id is required"]
        );

        let err = NewHeroPower::from_body(&body(json!({
            "strength": "strong",
            "hero_id": "1",
            "power_id": 2
        })))
        .unwrap_err();
        assert_eq!(
            err.messages(),
            vec![
                "strength must be one of: Strong, Weak, Average",
                "hero_id must be an integer"
            ]
        );
    }

    #[test]
    fn test_hero_power_patch() {
        assert!(HeroPowerPatch::from_body(&body(json!({}))).unwrap().is_empty());
        assert!(HeroPowerPatch::from_body(&body(json!({"hero_id": 4}))).unwrap().is_empty());
        assert_eq!(
            HeroPowerPatch::from_body(&body(json!({"strength": "Weak"})))
                .unwrap()
                .strength,
            Some(Strength::Weak)
        );
        assert!(HeroPowerPatch::from_body(&body(json!({"strength": null}))).is_err());
    }
}
