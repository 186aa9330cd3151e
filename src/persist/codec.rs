//! Save-blob codecs.
//!
//! JSON is the interchange format shared with existing saves:
//! `{"gold", "inventory", "selectedCardId", "autoFuse"}` with cards as
//! `{"uuid", "type", "level", "hp", "atk", "def"}`. Unknown keys are
//! ignored. Bincode snapshots are a compact local format.

use rustc_hash::FxHashSet;
use serde_json::Value;

use super::error::{PersistError, Result};
use crate::cards::Roster;
use crate::core::GameState;

/// The blob written when no save exists yet.
pub const DEFAULT_SAVE: &str = r#"{"gold": 1000, "inventory": [], "deck": null}"#;

impl GameState {
    /// Decode a JSON save.
    ///
    /// A missing or `null` inventory decodes as empty, missing gold as the
    /// starting amount. A selection that does not resolve is dropped.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut value: Value = serde_json::from_str(json)?;
        if let Value::Object(fields) = &mut value {
            if fields.get("inventory").is_some_and(Value::is_null) {
                fields.remove("inventory");
            }
        }

        let mut state: GameState = serde_json::from_value(value)?;
        state.check_cards()?;
        if state.repair_selection() {
            tracing::warn!("Dropped dangling selection from save");
        }
        Ok(state)
    }

    /// Encode as a JSON save.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Encode as a bincode snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a bincode snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut state: GameState = bincode::deserialize(bytes)?;
        state.check_cards()?;
        state.repair_selection();
        Ok(state)
    }

    /// Check that every card belongs to `roster`, ids are unique and
    /// stats are positive.
    pub fn validate(&self, roster: &Roster) -> Result<()> {
        self.check_cards()?;
        match self.inventory.iter().find(|c| !roster.contains(c.archetype)) {
            Some(card) => Err(PersistError::UnknownArchetype {
                id: card.id,
                archetype: card.archetype,
            }),
            None => Ok(()),
        }
    }

    fn check_cards(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for card in &self.inventory {
            if !seen.insert(card.id) {
                return Err(PersistError::DuplicateCard(card.id));
            }
            if card.hp == 0 || card.atk == 0 || card.def == 0 {
                return Err(PersistError::InvalidStats { id: card.id });
            }
        }
        Ok(())
    }
}
