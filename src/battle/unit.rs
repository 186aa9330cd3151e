//! Battle-scope combatants.

use serde::{Deserialize, Serialize};

use crate::cards::{ArchetypeId, Card};

/// Which side of the battle acted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

fn signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Ephemeral copy of a card for the length of one battle.
///
/// HP is signed: a finishing blow can take it below zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleUnit {
    pub archetype: ArchetypeId,
    pub level: u32,
    pub atk: i64,
    pub def: i64,
    pub max_hp: i64,
    pub current_hp: i64,
    /// 0..=heat_cap, starts at 0.
    pub heat: u32,
}

impl BattleUnit {
    /// Snapshot a card at full health and zero heat.
    #[must_use]
    pub fn from_card(card: &Card) -> Self {
        let hp = signed(card.hp);
        Self {
            archetype: card.archetype,
            level: card.level,
            atk: signed(card.atk),
            def: signed(card.def),
            max_hp: hp,
            current_hp: hp,
            heat: 0,
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Non-critical damage against `target`: `max(1, atk - target.def)`.
    #[must_use]
    pub fn base_damage_against(&self, target: &BattleUnit) -> i64 {
        self.atk.saturating_sub(target.def).max(1)
    }

    /// HP clamped at zero, for display.
    #[must_use]
    pub fn display_hp(&self) -> i64 {
        self.current_hp.max(0)
    }
}
