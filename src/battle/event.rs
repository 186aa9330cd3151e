//! Battle events and results.
//!
//! A battle is observed as an ordered stream of `BattleEvent`s. The
//! presentation layer decides how fast to play them back; the simulator
//! never sleeps.

use serde::{Deserialize, Serialize};

use super::unit::{BattleUnit, Side};
use crate::cards::Card;
use crate::core::GameConfig;

/// Terminal result from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

/// Gold paid out per outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub win: u64,
    pub loss: u64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl Rewards {
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            win: config.win_reward,
            loss: config.loss_reward,
        }
    }

    #[must_use]
    pub fn for_outcome(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::Win => self.win,
            Outcome::Loss => self.loss,
        }
    }
}

/// One observable step of a battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// Both units at full health, before the first turn.
    Engaged {
        player: BattleUnit,
        opponent: BattleUnit,
    },

    /// Normal attack. `target_hp` is the target's HP afterwards.
    Hit {
        round: u32,
        side: Side,
        damage: i64,
        target_hp: i64,
        heat: u32,
    },

    /// Critical attack.
    Critical {
        round: u32,
        side: Side,
        damage: i64,
        target_hp: i64,
        heat: u32,
    },

    /// The acting unit hurt itself and dealt no damage.
    SelfHarm {
        round: u32,
        side: Side,
        damage: i64,
        own_hp: i64,
        heat: u32,
    },

    /// Last event of every battle.
    Finished {
        outcome: Outcome,
        gold: u64,
        rounds: u32,
    },
}

impl BattleEvent {
    /// The acting side for turn events.
    #[must_use]
    pub fn side(&self) -> Option<Side> {
        match self {
            BattleEvent::Hit { side, .. }
            | BattleEvent::Critical { side, .. }
            | BattleEvent::SelfHarm { side, .. } => Some(*side),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, BattleEvent::Finished { .. })
    }
}

/// Result of a finished battle, to be settled into the game session.
///
/// Only a finished [`Battle`](super::Battle) produces one. It is not
/// `Clone` and settling consumes it, so a battle is paid at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct BattleReport {
    pub(super) outcome: Outcome,
    pub(super) gold: u64,
    pub(super) rounds: u32,
    pub(super) player_hp: i64,
    pub(super) opponent_hp: i64,
    pub(super) opponent: Card,
}

impl BattleReport {
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Gold announced by the battle's `Finished` event.
    ///
    /// The session pays from its own config, not from this value.
    #[must_use]
    pub fn gold(&self) -> u64 {
        self.gold
    }

    /// Round in which the battle ended (starts at 1).
    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    #[must_use]
    pub fn player_hp(&self) -> i64 {
        self.player_hp
    }

    #[must_use]
    pub fn opponent_hp(&self) -> i64 {
        self.opponent_hp
    }

    /// The generated opponent.
    #[must_use]
    pub fn opponent(&self) -> &Card {
        &self.opponent
    }
}
