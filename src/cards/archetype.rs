//! Archetypes - the static half of a card.
//!
//! An `Archetype` is an immutable roster entry with a name and base
//! stats. Generated cards scale these by level and roll variance on top.

use serde::{Deserialize, Serialize};

/// Index of an archetype in its roster.
///
/// Serializes as a bare integer (the save format's `type` field).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchetypeId(pub u32);

impl ArchetypeId {
    /// Create a new archetype ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Roster position.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ArchetypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Archetype({})", self.0)
    }
}

/// The three combat stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u64,
    pub atk: u64,
    pub def: u64,
}

impl Stats {
    #[must_use]
    pub const fn new(hp: u64, atk: u64, def: u64) -> Self {
        Self { hp, atk, def }
    }

    /// hp + atk + def.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.hp.saturating_add(self.atk).saturating_add(self.def)
    }

    /// Component-wise saturating sum.
    #[must_use]
    pub const fn saturating_add(self, other: Stats) -> Stats {
        Stats {
            hp: self.hp.saturating_add(other.hp),
            atk: self.atk.saturating_add(other.atk),
            def: self.def.saturating_add(other.def),
        }
    }

    /// Component-wise floor division.
    #[must_use]
    pub const fn halved(self) -> Stats {
        Stats {
            hp: self.hp / 2,
            atk: self.atk / 2,
            def: self.def / 2,
        }
    }
}

/// Static archetype definition.
///
/// ## Example
///
/// ```
/// use rust_gacha::cards::{Archetype, ArchetypeId, Stats};
///
/// let gpt = Archetype::new(ArchetypeId::new(0), "GPT", Stats::new(120, 25, 10));
/// assert_eq!(gpt.base.total(), 155);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    /// Roster position.
    pub id: ArchetypeId,

    /// Display name.
    pub name: String,

    /// Level-0 stats before variance.
    pub base: Stats,
}

impl Archetype {
    /// Create a new archetype.
    #[must_use]
    pub fn new(id: ArchetypeId, name: impl Into<String>, base: Stats) -> Self {
        Self {
            id,
            name: name.into(),
            base,
        }
    }
}
