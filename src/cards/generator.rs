//! Card generation.
//!
//! A generated card picks an archetype uniformly from the roster, scales
//! its base stats by `growth ^ level`, and rolls an independent variance
//! factor per stat. Draw order is fixed (archetype, hp, atk, def, id) so
//! scripted sources line up predictably.

use super::archetype::Stats;
use super::card::Card;
use super::roster::Roster;
use crate::core::{GameConfig, RandomSource};

/// Rolls new cards from a roster.
#[derive(Clone, Copy, Debug)]
pub struct CardGenerator<'a> {
    roster: &'a Roster,
    config: &'a GameConfig,
}

impl<'a> CardGenerator<'a> {
    #[must_use]
    pub fn new(roster: &'a Roster, config: &'a GameConfig) -> Self {
        Self { roster, config }
    }

    /// Generate one card at `level`.
    ///
    /// Every stat is at least 1.
    pub fn generate<R: RandomSource + ?Sized>(&self, level: u32, rng: &mut R) -> Card {
        let archetype = self.roster.choose(rng);

        let multiplier = self.config.level_multiplier(level);
        let mut roll = |base: u64| -> u64 {
            let variance = rng.uniform(self.config.variance_min, self.config.variance_max);
            ((base as f64 * multiplier * variance).floor() as u64).max(1)
        };

        let stats = Stats::new(
            roll(archetype.base.hp),
            roll(archetype.base.atk),
            roll(archetype.base.def),
        );

        Card::with_stats(rng.next_card_id(), archetype.id, level, stats)
    }

    /// Generate `count` fresh level-0 cards.
    pub fn generate_pack<R: RandomSource + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Card> {
        (0..count).map(|_| self.generate(0, rng)).collect()
    }
}
