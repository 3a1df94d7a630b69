//! # Data Model
//!
//! The three row-backed entities and the joined records built from them.
//!
//! - `Hero` and `Power` are created independently.
//! - `HeroPower` links one hero to one power and carries a `Strength`.
//!   It cannot outlive either endpoint: deleting a hero or a power
//!   removes every link that references it.

mod types;

pub use types::{
    Hero, HeroPower, HeroPowerRecord, Power, Strength, StrengthParseError, VALID_STRENGTHS,
};
