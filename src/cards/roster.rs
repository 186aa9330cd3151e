//! Archetype roster.
//!
//! The `Roster` is the fixed, ordered list of archetypes a game rolls
//! from. Order matters: it is the tie-break order for fusion and the
//! index space of a card's `type`.

use thiserror::Error;

use super::archetype::{Archetype, ArchetypeId, Stats};
use crate::core::RandomSource;

/// Roster construction errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("roster must contain at least one archetype")]
    Empty,
}

/// Ordered, non-empty list of archetypes.
///
/// ## Example
///
/// ```
/// use rust_gacha::cards::{ArchetypeId, Roster};
///
/// let roster = Roster::standard();
/// assert_eq!(roster.len(), 6);
/// assert_eq!(roster.get(ArchetypeId::new(1)).unwrap().name, "Claude");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    archetypes: Vec<Archetype>,
}

impl Roster {
    /// Build a roster from `(name, base stats)` entries, assigning ids by
    /// position.
    pub fn new<I, S>(entries: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = (S, Stats)>,
        S: Into<String>,
    {
        let archetypes: Vec<_> = entries
            .into_iter()
            .enumerate()
            .map(|(i, (name, base))| Archetype::new(ArchetypeId::new(i as u32), name, base))
            .collect();

        if archetypes.is_empty() {
            return Err(RosterError::Empty);
        }
        Ok(Self { archetypes })
    }

    /// The shipped six-model roster.
    #[must_use]
    pub fn standard() -> Self {
        let archetypes = [
            ("GPT", Stats::new(120, 25, 10)),
            ("Claude", Stats::new(100, 20, 15)),
            ("Gemini", Stats::new(140, 18, 8)),
            ("Llama", Stats::new(90, 22, 5)),
            ("Mistral", Stats::new(80, 28, 3)),
            ("Grok", Stats::new(110, 20, 10)),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, base))| Archetype::new(ArchetypeId::new(i as u32), name, base))
        .collect();

        Self { archetypes }
    }

    /// Get an archetype by id.
    #[must_use]
    pub fn get(&self, id: ArchetypeId) -> Option<&Archetype> {
        self.archetypes.get(id.index())
    }

    /// Archetype at roster position `index`.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Archetype> {
        self.archetypes.get(index)
    }

    /// Pick an archetype uniformly. Consumes one draw.
    pub fn choose<R: RandomSource + ?Sized>(&self, rng: &mut R) -> &Archetype {
        &self.archetypes[rng.index(self.archetypes.len())]
    }

    /// Check if an id is in range.
    #[must_use]
    pub fn contains(&self, id: ArchetypeId) -> bool {
        id.index() < self.archetypes.len()
    }

    /// Display name for an id, or `"?"` when out of range.
    #[must_use]
    pub fn name_of(&self, id: ArchetypeId) -> &str {
        self.get(id).map_or("?", |a| a.name.as_str())
    }

    /// Number of archetypes (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// Iterate in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Archetype> {
        self.archetypes.iter()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::standard()
    }
}
