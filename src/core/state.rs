//! Persistent game state: gold, inventory, selection.
//!
//! `GameState` is the blob the persistence layer loads and stores. Field
//! names follow the save format (`gold`, `inventory`, `selectedCardId`,
//! `autoFuse`). See `crate::persist` for the JSON/bincode codec.

use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::selection::Selection;
use crate::cards::{Card, CardId};

fn default_gold() -> u64 {
    GameConfig::default().starting_gold
}

/// Everything a save holds.
///
/// Owned by a single writer (`GameSession`); mutations go through the
/// session so the selection can never point outside the inventory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Current gold.
    #[serde(default = "default_gold")]
    pub gold: u64,

    /// Owned cards, in insertion (or post-fusion) order.
    #[serde(default)]
    pub inventory: Vec<Card>,

    /// Equipped card.
    #[serde(default, rename = "selectedCardId")]
    pub selection: Selection,

    /// Run fusion after every pack purchase.
    #[serde(default)]
    pub auto_fuse: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(default_gold())
    }
}

impl GameState {
    /// Empty state with the given gold.
    #[must_use]
    pub fn new(gold: u64) -> Self {
        Self {
            gold,
            inventory: Vec::new(),
            selection: Selection::none(),
            auto_fuse: false,
        }
    }

    /// Fresh state for a config.
    #[must_use]
    pub fn for_config(config: &GameConfig) -> Self {
        Self::new(config.starting_gold)
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.inventory.iter().find(|c| c.id == id)
    }

    /// Check if a card is in the inventory.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.card(id).is_some()
    }

    /// The equipped card, if the selection resolves.
    #[must_use]
    pub fn equipped_card(&self) -> Option<&Card> {
        self.selection.get().and_then(|id| self.card(id))
    }

    /// Drop a selection that no longer resolves to an owned card.
    ///
    /// Returns true if the selection was cleared.
    pub fn repair_selection(&mut self) -> bool {
        match self.selection.get() {
            Some(id) if !self.contains(id) => {
                self.selection.clear();
                true
            }
            _ => false,
        }
    }
}
