//! Entity definitions
//!
//! Rows are read straight into these types with `sqlx::FromRow`, except
//! `HeroPower` whose `strength` column is parsed through `Strength`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every permitted strength, in the order they are reported.
pub const VALID_STRENGTHS: [Strength; 3] = [Strength::Strong, Strength::Weak, Strength::Average];

/// How strongly a hero wields a power.
///
/// Matching is exact and case-sensitive: `"strong"` is not a strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strength {
    Strong,
    Weak,
    Average,
}

impl Strength {
    /// Returns the stored and serialized representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Strong => "Strong",
            Strength::Weak => "Weak",
            Strength::Average => "Average",
        }
    }

    /// Comma-separated list of the enumerants, for error messages
    pub fn allowed() -> String {
        VALID_STRENGTHS
            .iter()
            .map(Strength::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that is not one of the strength enumerants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid strength: {0:?}")]
pub struct StrengthParseError(pub String);

impl FromStr for Strength {
    type Err = StrengthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Strong" => Ok(Strength::Strong),
            "Weak" => Ok(Strength::Weak),
            "Average" => Ok(Strength::Average),
            other => Err(StrengthParseError(other.to_string())),
        }
    }
}

/// A hero row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Hero {
    pub id: i64,
    pub name: String,
    pub super_name: String,
}

/// A power row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Power {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// A hero-power association row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroPower {
    pub id: i64,
    pub hero_id: i64,
    pub power_id: i64,
    pub strength: Strength,
}

/// An association together with both of its endpoints.
///
/// Serializes as `{id, hero_id, power_id, strength, hero, power}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroPowerRecord {
    #[serde(flatten)]
    pub link: HeroPower,
    pub hero: Hero,
    pub power: Power,
}
