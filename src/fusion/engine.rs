//! Cascading 5-for-1 fusion.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::buckets::BucketGrid;
use crate::cards::{Card, Roster, Stats};
use crate::core::{GameConfig, RandomSource, Selection};

/// How a fusion pass ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FusionStatus {
    /// At least one merge happened.
    Fused,
    /// Fewer cards than one batch; no scan was made.
    InsufficientCards,
    /// Scanned, but no bucket reached a full batch.
    NoCandidates,
}

/// Result of a fusion pass.
#[derive(Clone, Debug, PartialEq)]
pub struct FusionOutcome {
    /// Post-fusion inventory. Identical to the input when nothing merged.
    pub inventory: Vec<Card>,

    /// Number of merges performed across the whole cascade.
    pub upgraded: usize,

    pub status: FusionStatus,

    /// True if the equipped card was consumed.
    pub selection_cleared: bool,
}

/// Counts and flags of a fusion pass, without the inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionSummary {
    pub upgraded: usize,
    pub status: FusionStatus,
    pub selection_cleared: bool,
}

impl FusionOutcome {
    fn unchanged(inventory: Vec<Card>, status: FusionStatus) -> Self {
        Self {
            inventory,
            upgraded: 0,
            status,
            selection_cleared: false,
        }
    }

    /// Split into the new inventory and the summary.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Card>, FusionSummary) {
        let summary = FusionSummary {
            upgraded: self.upgraded,
            status: self.status,
            selection_cleared: self.selection_cleared,
        };
        (self.inventory, summary)
    }
}

/// Merges full buckets of same-level, same-archetype cards.
///
/// ## Algorithm
///
/// Cards are bucketed by `(min(level, max_level), archetype)`. Levels
/// `0..max_level` are walked in ascending order and archetypes in roster
/// order. While a bucket holds a full batch, the oldest batch is removed
/// and replaced by one card at `level + 1` whose stats are
/// `floor(sum / 2)`. The new card is appended to the next level's bucket,
/// so merges cascade within a single pass.
///
/// ```
/// use rust_gacha::cards::{ArchetypeId, Card, Roster};
/// use rust_gacha::core::{GameConfig, ScriptedRng, Selection};
/// use rust_gacha::fusion::FusionEngine;
///
/// let roster = Roster::standard();
/// let config = GameConfig::default();
/// let mut rng = ScriptedRng::new([]);
///
/// let inventory: Vec<Card> = (0..5)
///     .map(|i| Card::new(rust_gacha::cards::CardId::from_u128(100 + i), ArchetypeId::new(0), 0, 100, 20, 10))
///     .collect();
///
/// let outcome = FusionEngine::new(&roster, &config).fuse(inventory, &mut Selection::none(), &mut rng);
/// assert_eq!(outcome.upgraded, 1);
/// assert_eq!(outcome.inventory[0].stats().hp, 250);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FusionEngine<'a> {
    roster: &'a Roster,
    config: &'a GameConfig,
}

impl<'a> FusionEngine<'a> {
    #[must_use]
    pub fn new(roster: &'a Roster, config: &'a GameConfig) -> Self {
        Self { roster, config }
    }

    /// Cards consumed per merge. Never below 2.
    #[must_use]
    pub fn batch(&self) -> usize {
        self.config.fusion_batch.max(2)
    }

    /// Run one full cascade over `inventory`.
    ///
    /// `selection` is cleared if the equipped card is consumed. `rng`
    /// only supplies ids for produced cards.
    pub fn fuse<R: RandomSource + ?Sized>(
        &self,
        inventory: Vec<Card>,
        selection: &mut Selection,
        rng: &mut R,
    ) -> FusionOutcome {
        let batch = self.batch();
        if inventory.len() < batch {
            return FusionOutcome::unchanged(inventory, FusionStatus::InsufficientCards);
        }

        let max_level = self.config.max_level;
        let width = self.roster.len();
        let mut grid = BucketGrid::new(max_level, width);
        let mut strays = Vec::new();

        for card in &inventory {
            if let Err(stray) = grid.push(card.clone()) {
                strays.push(stray);
            }
        }

        let mut upgraded = 0usize;
        let mut selection_cleared = false;

        for level in 0..max_level as usize {
            for archetype in 0..width {
                while grid.bucket_mut(level, archetype).len() >= batch {
                    let materials: SmallVec<[Card; 5]> =
                        grid.bucket_mut(level, archetype).drain(..batch).collect();

                    let sum = materials
                        .iter()
                        .fold(Stats::default(), |acc, m| acc.saturating_add(m.stats()));

                    for material in &materials {
                        selection_cleared |= selection.clear_if(material.id);
                    }

                    let fused = Card::with_stats(
                        rng.next_card_id(),
                        materials[0].archetype,
                        level as u32 + 1,
                        sum.halved(),
                    );

                    tracing::debug!(
                        "Fused {} x {} L{} into {} L{}",
                        batch,
                        self.roster.name_of(fused.archetype),
                        level,
                        fused.id,
                        fused.level
                    );

                    grid.bucket_mut(level + 1, archetype).push(fused);
                    upgraded += 1;
                }
            }
        }

        if upgraded == 0 {
            return FusionOutcome::unchanged(inventory, FusionStatus::NoCandidates);
        }

        let mut merged = grid.into_cards();
        merged.extend(strays);

        tracing::info!(
            upgraded,
            before = inventory.len(),
            after = merged.len(),
            "Fusion cascade complete"
        );

        FusionOutcome {
            inventory: merged,
            upgraded,
            status: FusionStatus::Fused,
            selection_cleared,
        }
    }
}
