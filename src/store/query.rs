//! # Query Composer
//!
//! Builds read queries over the hero-power collection joined with its
//! heroes and powers. Every filter is optional and filters combine with
//! AND. Values are always bound, never spliced into the SQL text.

use sqlx::{QueryBuilder, Sqlite};

use crate::model::{Hero, HeroPower, HeroPowerRecord, Power, Strength};

use super::errors::{StoreError, StoreResult};

/// Joined projection every hero-power read starts from
pub(crate) const RECORD_SELECT: &str = "SELECT hp.id, hp.hero_id, hp.power_id, hp.strength, \
     h.name AS hero_name, h.super_name AS hero_super_name, \
     p.name AS power_name, p.description AS power_description \
     FROM hero_powers hp \
     JOIN heroes h ON h.id = hp.hero_id \
     JOIN powers p ON p.id = hp.power_id";

/// Window over an ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

/// Filters for a hero-power listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroPowerQuery {
    pub hero_id: Option<i64>,
    pub power_id: Option<i64>,
    pub strength: Option<Strength>,
    /// Case-insensitive substring of the hero's name or super name
    pub hero_search: Option<String>,
    /// Case-insensitive substring of the power's name or description
    pub power_search: Option<String>,
    /// Absent means the full result set
    pub page: Option<Page>,
}

impl HeroPowerQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every link of one hero
    pub fn for_hero(hero_id: i64) -> Self {
        Self {
            hero_id: Some(hero_id),
            ..Self::default()
        }
    }

    /// Every link of one power
    pub fn for_power(power_id: i64) -> Self {
        Self {
            power_id: Some(power_id),
            ..Self::default()
        }
    }

    /// Composes the SELECT, ordered by ascending link id.
    pub fn build(&self) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new(RECORD_SELECT);
        builder.push(" WHERE 1 = 1");

        if let Some(hero_id) = self.hero_id {
            builder.push(" AND hp.hero_id = ").push_bind(hero_id);
        }

        if let Some(power_id) = self.power_id {
            builder.push(" AND hp.power_id = ").push_bind(power_id);
        }

        if let Some(strength) = self.strength {
            builder.push(" AND hp.strength = ").push_bind(strength.as_str());
        }

        if let Some(term) = &self.hero_search {
            push_any_contains(&mut builder, &["h.name", "h.super_name"], term);
        }

        if let Some(term) = &self.power_search {
            push_any_contains(&mut builder, &["p.name", "p.description"], term);
        }

        builder.push(" ORDER BY hp.id");

        if let Some(page) = self.page {
            builder
                .push(" LIMIT ")
                .push_bind(i64::from(page.limit))
                .push(" OFFSET ")
                .push_bind(i64::from(page.offset));
        }

        builder
    }
}

/// Appends ` AND (col1 LIKE ? OR col2 LIKE ? ...)` for a substring match.
pub(crate) fn push_any_contains(
    builder: &mut QueryBuilder<'static, Sqlite>,
    columns: &[&str],
    term: &str,
) {
    let pattern = contains_pattern(term);
    builder.push(" AND (");
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            builder.push(" OR ");
        }
        builder
            .push(*column)
            .push(" LIKE ")
            .push_bind(pattern.clone())
            .push(r" ESCAPE '\'");
    }
    builder.push(")");
}

/// LIKE pattern matching `term` anywhere, with the wildcards in `term`
/// taken literally.
///
/// SQLite's LIKE is already case-insensitive for ASCII.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Row shape of `RECORD_SELECT`
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct HeroPowerRow {
    id: i64,
    hero_id: i64,
    power_id: i64,
    strength: String,
    hero_name: String,
    hero_super_name: String,
    power_name: String,
    power_description: String,
}

impl TryFrom<HeroPowerRow> for HeroPowerRecord {
    type Error = StoreError;

    fn try_from(row: HeroPowerRow) -> StoreResult<Self> {
        let strength = row.strength.parse().map_err(|e| StoreError::Corrupt {
            table: "hero_powers",
            message: format!("row {}: {}", row.id, e),
        })?;

        Ok(HeroPowerRecord {
            link: HeroPower {
                id: row.id,
                hero_id: row.hero_id,
                power_id: row.power_id,
                strength,
            },
            hero: Hero {
                id: row.hero_id,
                name: row.hero_name,
                super_name: row.hero_super_name,
            },
            power: Power {
                id: row.power_id,
                name: row.power_name,
                description: row.power_description,
            },
        })
    }
}

/// Converts fetched rows, failing on the first corrupt one
pub(crate) fn into_records(rows: Vec<HeroPowerRow>) -> StoreResult<Vec<HeroPowerRecord>> {
    rows.into_iter().map(HeroPowerRecord::try_from).collect()
}
