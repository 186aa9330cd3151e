//! Card instances.
//!
//! A `Card` is an owned inventory entry: identity, archetype, level and
//! rolled stats. Cards are never mutated after creation; battles copy
//! them into `BattleUnit`s and fusion replaces five of them with a new one.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::archetype::{ArchetypeId, Stats};

/// Opaque unique card identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(Uuid);

impl CardId {
    /// Build a v4 UUID from 16 random bytes.
    #[must_use]
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Deterministic id from an integer (scripted sources and tests).
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CardId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A card in the inventory.
///
/// Serialized field names match the save format: `uuid`, `type`, `level`,
/// `hp`, `atk`, `def`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique identity.
    #[serde(rename = "uuid")]
    pub id: CardId,

    /// Roster entry this card was rolled from.
    #[serde(rename = "type")]
    pub archetype: ArchetypeId,

    /// Tier. Fresh pack cards are level 0.
    pub level: u32,

    pub hp: u64,
    pub atk: u64,
    pub def: u64,
}

impl Card {
    #[must_use]
    pub fn new(id: CardId, archetype: ArchetypeId, level: u32, hp: u64, atk: u64, def: u64) -> Self {
        Self {
            id,
            archetype,
            level,
            hp,
            atk,
            def,
        }
    }

    /// Create a card from a stat block.
    #[must_use]
    pub fn with_stats(id: CardId, archetype: ArchetypeId, level: u32, stats: Stats) -> Self {
        Self::new(id, archetype, level, stats.hp, stats.atk, stats.def)
    }

    /// The card's stat block.
    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats::new(self.hp, self.atk, self.def)
    }

    /// hp + atk + def.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.stats().total()
    }

    /// Display ordering: total stats descending, then level descending,
    /// then archetype ascending.
    #[must_use]
    pub fn display_order(a: &Card, b: &Card) -> std::cmp::Ordering {
        b.total()
            .cmp(&a.total())
            .then_with(|| b.level.cmp(&a.level))
            .then_with(|| a.archetype.cmp(&b.archetype))
    }
}
