//! # Response Shaping
//!
//! One explicit shape per endpoint. Nested relations go one level deep
//! only: a hero's links embed the power, a power's links embed the hero,
//! and a link embeds both.

use serde::Serialize;

use crate::model::{Hero, HeroPower, HeroPowerRecord, Power, Strength};
use crate::store::{HeroMatch, PowerMatch};

/// Longest power description shown in search results before truncation
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// A link as seen from its hero
#[derive(Debug, Clone, Serialize)]
pub struct LinkWithPower {
    #[serde(flatten)]
    pub link: HeroPower,
    pub power: Power,
}

/// A link as seen from its power
#[derive(Debug, Clone, Serialize)]
pub struct LinkWithHero {
    #[serde(flatten)]
    pub link: HeroPower,
    pub hero: Hero,
}

/// `GET /heroes/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct HeroDetail {
    #[serde(flatten)]
    pub hero: Hero,
    pub hero_powers: Vec<LinkWithPower>,
}

impl HeroDetail {
    pub fn new(hero: Hero, records: Vec<HeroPowerRecord>) -> Self {
        let hero_powers = records
            .into_iter()
            .map(|record| LinkWithPower {
                link: record.link,
                power: record.power,
            })
            .collect();
        Self { hero, hero_powers }
    }
}

/// `GET /powers/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct PowerDetail {
    #[serde(flatten)]
    pub power: Power,
    pub hero_powers: Vec<LinkWithHero>,
}

impl PowerDetail {
    pub fn new(power: Power, records: Vec<HeroPowerRecord>) -> Self {
        let hero_powers = records
            .into_iter()
            .map(|record| LinkWithHero {
                link: record.link,
                hero: record.hero,
            })
            .collect();
        Self { power, hero_powers }
    }
}

/// Delete confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn hero_deleted(hero: &Hero) -> Self {
        Self {
            message: format!("Hero \"{}\" deleted successfully", hero.name),
        }
    }

    pub fn power_deleted(power: &Power) -> Self {
        Self {
            message: format!("Power \"{}\" deleted successfully", power.name),
        }
    }

    pub fn hero_power_deleted(record: &HeroPowerRecord) -> Self {
        Self {
            message: format!(
                "Relationship between \"{}\" and \"{}\" deleted successfully",
                record.hero.name, record.power.name
            ),
        }
    }
}

/// Power as listed in search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PowerPreview {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub heroes_count: i64,
}

impl From<PowerMatch> for PowerPreview {
    fn from(found: PowerMatch) -> Self {
        Self {
            id: found.id,
            name: found.name,
            description: preview(&found.description),
            heroes_count: found.heroes_count,
        }
    }
}

/// Cuts `text` to its first 100 characters plus `...` when longer.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Link as listed in search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipMatch {
    pub id: i64,
    pub hero_name: String,
    pub hero_super_name: String,
    pub power_name: String,
    pub strength: Strength,
}

impl From<HeroPowerRecord> for RelationshipMatch {
    fn from(record: HeroPowerRecord) -> Self {
        Self {
            id: record.link.id,
            hero_name: record.hero.name,
            hero_super_name: record.hero.super_name,
            power_name: record.power.name,
            strength: record.link.strength,
        }
    }
}

/// Per-class result lists; a class outside the requested scope is omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heroes: Option<Vec<HeroMatch>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub powers: Option<Vec<PowerPreview>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<RelationshipMatch>>,
}

/// `GET /search`
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub search_type: String,
    pub results: SearchResults,
}
