//! Engine configuration.
//!
//! - `GameConfig`: economy, card generation and fusion parameters
//! - `BattleConfig`: heat, self-harm and critical-hit tuning
//!
//! Defaults reproduce the shipped game balance. Both structs are
//! serde-serializable so a front end can load them from JSON.

use serde::{Deserialize, Serialize};

/// Economy, generation and fusion parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Gold in a fresh save.
    pub starting_gold: u64,

    /// Gold cost of one pack.
    pub pack_price: u64,

    /// Cards per pack.
    pub pack_size: usize,

    /// Cards consumed by one merge.
    pub fusion_batch: usize,

    /// Highest level the fusion cascade produces.
    /// Cards at or above this level are inert.
    pub max_level: u32,

    /// Stat multiplier per level (`growth ^ level`).
    pub stat_growth: f64,

    /// Lower bound of the per-stat variance factor.
    pub variance_min: f64,

    /// Upper bound of the per-stat variance factor.
    pub variance_max: f64,

    /// Gold awarded for a won battle.
    pub win_reward: u64,

    /// Gold awarded for a lost battle.
    pub loss_reward: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_gold: 1000,
            pack_price: 100,
            pack_size: 5,
            fusion_batch: 5,
            max_level: 10,
            stat_growth: 2.5,
            variance_min: 0.8,
            variance_max: 1.2,
            win_reward: 50,
            loss_reward: 10,
        }
    }
}

impl GameConfig {
    /// Set the pack price.
    #[must_use]
    pub fn with_pack_price(mut self, price: u64) -> Self {
        self.pack_price = price;
        self
    }

    /// Set the number of cards per pack.
    #[must_use]
    pub fn with_pack_size(mut self, size: usize) -> Self {
        self.pack_size = size;
        self
    }

    /// Set the maximum fusion level.
    #[must_use]
    pub fn with_max_level(mut self, level: u32) -> Self {
        self.max_level = level;
        self
    }

    /// Set the starting gold for fresh saves.
    #[must_use]
    pub fn with_starting_gold(mut self, gold: u64) -> Self {
        self.starting_gold = gold;
        self
    }

    /// Set the stat variance bounds.
    #[must_use]
    pub fn with_variance(mut self, min: f64, max: f64) -> Self {
        self.variance_min = min;
        self.variance_max = max;
        self
    }

    /// Stat multiplier for a card of the given level.
    #[must_use]
    pub fn level_multiplier(&self, level: u32) -> f64 {
        self.stat_growth.powi(level.min(i32::MAX as u32) as i32)
    }
}

/// Battle tuning.
///
/// Heat is an integer in `0..=heat_cap`. Each turn the acting unit
/// self-harms with probability `heat / self_harm_divisor`, otherwise
/// crits with probability `heat / crit_divisor`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Minimum heat gained per turn.
    pub heat_gain_min: u32,

    /// Maximum heat gained per turn (inclusive).
    pub heat_gain_max: u32,

    /// Heat ceiling.
    pub heat_cap: u32,

    /// Self-harm probability is `heat / self_harm_divisor`.
    pub self_harm_divisor: f64,

    /// Critical probability is `heat / crit_divisor`.
    pub crit_divisor: f64,

    /// Damage multiplier on a critical hit (floored).
    pub crit_multiplier: f64,

    /// Fraction of max HP lost on self-harm (floored).
    pub self_harm_fraction: f64,

    /// Chance the opponent is generated one level above the player.
    pub opponent_promote_chance: f64,

    /// Chance the opponent level is then lowered by one.
    pub opponent_demote_chance: f64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            heat_gain_min: 10,
            heat_gain_max: 20,
            heat_cap: 100,
            self_harm_divisor: 300.0,
            crit_divisor: 100.0,
            crit_multiplier: 1.5,
            self_harm_fraction: 0.1,
            opponent_promote_chance: 0.4,
            opponent_demote_chance: 0.2,
        }
    }
}

impl BattleConfig {
    /// Set the per-turn heat gain range.
    #[must_use]
    pub fn with_heat_gain(mut self, min: u32, max: u32) -> Self {
        self.heat_gain_min = min;
        self.heat_gain_max = max.max(min);
        self
    }

    /// Set the critical damage multiplier.
    #[must_use]
    pub fn with_crit_multiplier(mut self, multiplier: f64) -> Self {
        self.crit_multiplier = multiplier;
        self
    }

    /// Set the opponent level drift chances.
    #[must_use]
    pub fn with_opponent_drift(mut self, promote: f64, demote: f64) -> Self {
        self.opponent_promote_chance = promote;
        self.opponent_demote_chance = demote;
        self
    }

    /// Probability of self-harm at the given heat.
    #[must_use]
    pub fn self_harm_chance(&self, heat: u32) -> f64 {
        f64::from(heat) / self.self_harm_divisor
    }

    /// Probability of a critical hit at the given heat.
    #[must_use]
    pub fn crit_chance(&self, heat: u32) -> f64 {
        f64::from(heat) / self.crit_divisor
    }
}
