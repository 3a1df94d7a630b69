//! # Validation Engine
//!
//! Field-level rules applied by handlers before anything reaches the store.
//!
//! - `rules`: one function per field rule, each returning the normalized
//!   value or a `FieldError`
//! - `payload`: create and patch bodies built from those rules
//!
//! Validation is explicit: nothing runs on assignment, and every rule can
//! be exercised without a database.

mod errors;
mod payload;
pub mod rules;

pub use errors::{FieldError, ValidationErrors, ValidationResult};
pub use payload::{
    object_body, Body, HeroPatch, HeroPowerPatch, NewHero, NewHeroPower, NewPower, PowerPatch,
};
pub use rules::MIN_DESCRIPTION_CHARS;
