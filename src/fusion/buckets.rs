//! Level × archetype bucket arena.

use crate::cards::Card;

/// Flat `(max_level + 1) × roster_len` grid of card lists.
///
/// Cell `(level, archetype)` lives at `level * width + archetype`.
/// Levels above `max_level` are folded into the top row.
#[derive(Clone, Debug)]
pub(crate) struct BucketGrid {
    width: usize,
    top: usize,
    cells: Vec<Vec<Card>>,
}

impl BucketGrid {
    pub(crate) fn new(max_level: u32, width: usize) -> Self {
        let top = max_level as usize;
        Self {
            width,
            top,
            cells: vec![Vec::new(); (top + 1) * width],
        }
    }

    fn slot(&self, level: usize, archetype: usize) -> usize {
        level.min(self.top) * self.width + archetype
    }

    /// Append a card to its bucket. Returns the card back if its
    /// archetype is outside the grid.
    pub(crate) fn push(&mut self, card: Card) -> Result<(), Card> {
        let archetype = card.archetype.index();
        if archetype >= self.width {
            return Err(card);
        }
        let slot = self.slot(card.level as usize, archetype);
        self.cells[slot].push(card);
        Ok(())
    }

    pub(crate) fn bucket_mut(&mut self, level: usize, archetype: usize) -> &mut Vec<Card> {
        let slot = self.slot(level, archetype);
        &mut self.cells[slot]
    }

    /// Flatten level-major, archetype-minor.
    pub(crate) fn into_cards(self) -> Vec<Card> {
        self.cells.into_iter().flatten().collect()
    }
}
