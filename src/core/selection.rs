//! Equip state: which single card is taken into battle.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// At most one equipped card.
///
/// Serializes as the bare id (or `null`), matching the save format's
/// `selectedCardId` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(Option<CardId>);

impl Selection {
    /// Nothing equipped.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// A selection holding `id`.
    #[must_use]
    pub const fn of(id: CardId) -> Self {
        Self(Some(id))
    }

    /// The equipped id, if any.
    #[must_use]
    pub fn get(&self) -> Option<CardId> {
        self.0
    }

    /// Check if `id` is the equipped card.
    #[must_use]
    pub fn is(&self, id: CardId) -> bool {
        self.0 == Some(id)
    }

    /// Check if nothing is equipped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Equip `id`, or unequip it if it is already equipped.
    ///
    /// Returns the new selection.
    pub fn toggle(&mut self, id: CardId) -> Selection {
        self.0 = if self.is(id) { None } else { Some(id) };
        *self
    }

    /// Unequip if `id` is the equipped card. Returns true if cleared.
    pub fn clear_if(&mut self, id: CardId) -> bool {
        if self.is(id) {
            self.0 = None;
            true
        } else {
            false
        }
    }

    /// Unequip unconditionally.
    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// Pure form of [`Selection::toggle`].
#[must_use]
pub fn toggle_equip(id: CardId, current: Selection) -> Selection {
    let mut next = current;
    next.toggle(id)
}
