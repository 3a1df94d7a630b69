//! # Store
//!
//! Relational persistence for heroes, powers and the links between them.
//!
//! Every mutation runs in its own transaction: a cascade delete or a
//! reference-checked link insert either lands completely or not at all.

mod database;
mod errors;
mod hero_powers;
mod heroes;
mod powers;
pub mod query;
mod search;
mod seed;
mod stats;

pub use database::Database;
pub use errors::{StoreError, StoreResult};
pub use query::{contains_pattern, HeroPowerQuery, Page};
pub use search::{HeroMatch, PowerMatch, SearchScope};
pub use seed::SeedSummary;
pub use stats::{RankedHero, RankedPower, Stats, StrengthDistribution, TOP_N};

/// Whether creating a hero or power may reuse an existing name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamePolicy {
    #[default]
    AllowDuplicates,
    /// A hero may not share its name or super name with another hero; a
    /// power may not share its name with another power.
    RejectDuplicates,
}

impl NamePolicy {
    pub fn from_flag(reject_duplicates: bool) -> Self {
        if reject_duplicates {
            NamePolicy::RejectDuplicates
        } else {
            NamePolicy::AllowDuplicates
        }
    }
}
