//! Game session: the single owner of mutable game state.

use crate::battle::{Battle, BattleReport, BattleSimulator, Rewards};
use crate::cards::{Card, CardGenerator, CardId, Roster};
use crate::core::{BattleConfig, GameConfig, GameRng, GameRngState, GameState, Selection};
use crate::fusion::{FusionEngine, FusionSummary};
use crate::persist::{PersistError, SaveStore};

use super::error::{GameError, Result};

/// Cards drawn by one pack purchase.
#[derive(Clone, Debug, PartialEq)]
pub struct PackOpening {
    /// The freshly generated cards, in draw order.
    pub cards: Vec<Card>,

    /// Auto-fusion result, when it upgraded anything.
    pub auto_fused: Option<FusionSummary>,
}

/// Owns gold, inventory, selection and the random stream.
///
/// Every mutating operation takes `&mut self`, so operations are
/// serialized. A battle runs on a fork of the stream and only touches
/// gold when its report is settled.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    battle_config: BattleConfig,
    roster: Roster,
    state: GameState,
    rng: GameRng,
}

/// Builder for creating a GameSession.
#[derive(Clone, Debug, Default)]
pub struct GameSessionBuilder {
    seed: u64,
    config: GameConfig,
    battle_config: BattleConfig,
    roster: Roster,
    state: Option<GameState>,
    rng_state: Option<GameRngState>,
}

impl GameSessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn battle_config(mut self, config: BattleConfig) -> Self {
        self.battle_config = config;
        self
    }

    pub fn roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }

    /// Start from a loaded state instead of a fresh one.
    pub fn state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Resume a checkpointed random stream (overrides `seed`).
    pub fn rng_state(mut self, state: GameRngState) -> Self {
        self.rng_state = Some(state);
        self
    }

    pub fn build(self) -> GameSession {
        let mut state = self
            .state
            .unwrap_or_else(|| GameState::for_config(&self.config));
        if state.repair_selection() {
            tracing::warn!("Dropped selection that does not resolve to an owned card");
        }

        let rng = match &self.rng_state {
            Some(saved) => GameRng::from_state(saved),
            None => GameRng::new(self.seed),
        };

        GameSession {
            config: self.config,
            battle_config: self.battle_config,
            roster: self.roster,
            state,
            rng,
        }
    }
}

impl GameSession {
    /// Fresh session with default configuration.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        GameSessionBuilder::new().seed(seed).build()
    }

    /// Load state from a store and start a session on it.
    ///
    /// Fails if the save holds cards outside the builder's roster.
    pub fn load<S: SaveStore + ?Sized>(
        builder: GameSessionBuilder,
        store: &mut S,
    ) -> std::result::Result<Self, PersistError> {
        let state = store.load()?;
        state.validate(&builder.roster)?;
        Ok(builder.state(state).build())
    }

    /// Write the current state to a store.
    pub fn persist<S: SaveStore + ?Sized>(&self, store: &mut S) -> std::result::Result<(), PersistError> {
        store.save(&self.state)
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn battle_config(&self) -> &BattleConfig {
        &self.battle_config
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn gold(&self) -> u64 {
        self.state.gold
    }

    #[must_use]
    pub fn inventory(&self) -> &[Card] {
        &self.state.inventory
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.state.selection
    }

    #[must_use]
    pub fn equipped_card(&self) -> Option<&Card> {
        self.state.equipped_card()
    }

    /// Bincode snapshot of the current state.
    pub fn snapshot(&self) -> std::result::Result<Vec<u8>, PersistError> {
        self.state.to_bytes()
    }

    /// Checkpoint of the session's random stream.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Inventory in display order: total stats descending, then level
    /// descending, then archetype ascending.
    #[must_use]
    pub fn sorted_inventory(&self) -> Vec<&Card> {
        let mut cards: Vec<_> = self.state.inventory.iter().collect();
        cards.sort_by(|a, b| Card::display_order(a, b));
        cards
    }

    // === Operations ===

    /// Buy one pack of level-0 cards.
    ///
    /// Runs fusion afterwards when auto-fuse is on.
    pub fn buy_pack(&mut self) -> Result<PackOpening> {
        let price = self.config.pack_price;
        if self.state.gold < price {
            return Err(GameError::InsufficientGold {
                needed: price,
                available: self.state.gold,
            });
        }

        self.state.gold -= price;
        let cards = CardGenerator::new(&self.roster, &self.config)
            .generate_pack(self.config.pack_size, &mut self.rng);
        self.state.inventory.extend(cards.iter().cloned());

        tracing::info!(
            price,
            gold = self.state.gold,
            inventory = self.state.inventory.len(),
            "Bought pack of {}",
            cards.len()
        );

        let auto_fused = if self.state.auto_fuse {
            Some(self.run_fusion()).filter(|summary| summary.upgraded > 0)
        } else {
            None
        };

        Ok(PackOpening { cards, auto_fused })
    }

    /// Fuse the inventory on request.
    ///
    /// Zero upgrades is reported through the summary status, not as an
    /// error.
    pub fn fuse(&mut self) -> Result<FusionSummary> {
        let needed = FusionEngine::new(&self.roster, &self.config).batch();
        let available = self.state.inventory.len();
        if available < needed {
            return Err(GameError::InsufficientCards { needed, available });
        }
        Ok(self.run_fusion())
    }

    fn run_fusion(&mut self) -> FusionSummary {
        let inventory = std::mem::take(&mut self.state.inventory);
        let mut selection = self.state.selection;

        let outcome = FusionEngine::new(&self.roster, &self.config).fuse(inventory, &mut selection, &mut self.rng);
        let (inventory, summary) = outcome.into_parts();

        self.state.inventory = inventory;
        self.state.selection = selection;
        summary
    }

    pub fn set_auto_fuse(&mut self, enabled: bool) {
        self.state.auto_fuse = enabled;
    }

    /// Equip `id`, or unequip it if already equipped.
    pub fn toggle_equip(&mut self, id: CardId) -> Result<Selection> {
        if !self.state.contains(id) {
            return Err(GameError::UnknownCard(id));
        }
        Ok(self.state.selection.toggle(id))
    }

    /// Start a battle with the equipped card.
    ///
    /// The battle runs on a fork of the session stream; nothing changes
    /// until [`GameSession::settle`] is called with its report.
    pub fn start_battle(&mut self) -> Result<Battle<GameRng>> {
        let player = self
            .state
            .equipped_card()
            .cloned()
            .ok_or(GameError::NoEquippedUnit)?;

        let rng = self.rng.fork();
        Ok(BattleSimulator::new(&self.roster, &self.config, &self.battle_config).simulate(&player, rng))
    }

    /// Pay out a finished battle. Returns the new gold total.
    ///
    /// The reward comes from this session's config for the report's
    /// outcome, whatever rewards the battle itself was built with.
    pub fn settle(&mut self, report: BattleReport) -> u64 {
        let reward = Rewards::from_config(&self.config).for_outcome(report.outcome());
        self.state.gold = self.state.gold.saturating_add(reward);
        tracing::info!(
            outcome = ?report.outcome(),
            reward,
            gold = self.state.gold,
            "Battle settled"
        );
        self.state.gold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::Outcome;
    use crate::cards::ArchetypeId;
    use crate::core::ScriptedRng;
    use crate::fusion::FusionStatus;

    fn card(id: u128, archetype: u32, level: u32) -> Card {
        Card::new(CardId::from_u128(id), ArchetypeId::new(archetype), level, 100, 20, 10)
    }

    fn session_with(cards: Vec<Card>, gold: u64) -> GameSession {
        let mut state = GameState::new(gold);
        state.inventory = cards;
        GameSessionBuilder::new().seed(42).state(state).build()
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new(1);
        assert_eq!(session.gold(), 1000);
        assert!(session.inventory().is_empty());
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_buy_pack() {
        let mut session = GameSession::new(1);
        let opening = session.buy_pack().unwrap();

        assert_eq!(opening.cards.len(), 5);
        assert!(opening.auto_fused.is_none());
        assert_eq!(session.gold(), 900);
        assert_eq!(session.inventory().len(), 5);
        assert!(session.inventory().iter().all(|c| c.level == 0));
    }

    #[test]
    fn test_buy_pack_insufficient_gold() {
        let mut session = session_with(Vec::new(), 99);

        let err = session.buy_pack().unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientGold {
                needed: 100,
                available: 99
            }
        );
        assert_eq!(session.gold(), 99);
        assert!(session.inventory().is_empty());
    }

    #[test]
    fn test_auto_fuse_after_pack() {
        let roster = Roster::new([("Only", crate::cards::Stats::new(100, 20, 10))]).unwrap();
        let mut session = GameSessionBuilder::new().seed(3).roster(roster).build();
        session.set_auto_fuse(true);

        let opening = session.buy_pack().unwrap();

        // Single-archetype roster: all five cards merge.
        assert_eq!(opening.auto_fused.map(|s| s.upgraded), Some(1));
        assert_eq!(session.inventory().len(), 1);
        assert_eq!(session.inventory()[0].level, 1);
    }

    #[test]
    fn test_fuse_insufficient_cards() {
        let mut session = session_with((1..=4).map(|i| card(i, 0, 0)).collect(), 0);
        let before = session.inventory().to_vec();

        assert_eq!(
            session.fuse(),
            Err(GameError::InsufficientCards {
                needed: 5,
                available: 4
            })
        );
        assert_eq!(session.inventory(), before.as_slice());
    }

    #[test]
    fn test_fuse_no_candidates_is_ok() {
        let cards: Vec<_> = (0..6).map(|i| card(i as u128 + 1, i, 0)).collect();
        let mut session = session_with(cards.clone(), 0);

        let summary = session.fuse().unwrap();
        assert_eq!(summary.status, FusionStatus::NoCandidates);
        assert_eq!(summary.upgraded, 0);
        assert_eq!(session.inventory(), cards.as_slice());
    }

    #[test]
    fn test_fuse_clears_consumed_selection() {
        let mut session = session_with((1..=5).map(|i| card(i, 0, 0)).collect(), 0);
        session.toggle_equip(CardId::from_u128(2)).unwrap();

        let summary = session.fuse().unwrap();
        assert_eq!(summary.upgraded, 1);
        assert!(summary.selection_cleared);
        assert!(session.selection().is_empty());
        assert!(session.equipped_card().is_none());
    }

    #[test]
    fn test_toggle_equip() {
        let mut session = session_with(vec![card(1, 0, 0), card(2, 1, 0)], 0);

        assert_eq!(session.toggle_equip(CardId::from_u128(1)).unwrap(), Selection::of(CardId::from_u128(1)));
        assert_eq!(session.toggle_equip(CardId::from_u128(2)).unwrap(), Selection::of(CardId::from_u128(2)));
        assert_eq!(session.toggle_equip(CardId::from_u128(2)).unwrap(), Selection::none());
        assert_eq!(
            session.toggle_equip(CardId::from_u128(9)),
            Err(GameError::UnknownCard(CardId::from_u128(9)))
        );
    }

    #[test]
    fn test_battle_requires_equipped_card() {
        let mut session = session_with(vec![card(1, 0, 0)], 0);
        assert!(matches!(session.start_battle(), Err(GameError::NoEquippedUnit)));
    }

    #[test]
    fn test_battle_and_settle() {
        let mut session = session_with(vec![card(1, 0, 0)], 0);
        session.toggle_equip(CardId::from_u128(1)).unwrap();

        let report = session.start_battle().unwrap().run();
        let expected = match report.outcome() {
            Outcome::Win => 50,
            Outcome::Loss => 10,
        };

        assert_eq!(session.gold(), 0);
        assert_eq!(session.settle(report), expected);
        assert_eq!(session.gold(), expected);
    }

    #[test]
    fn test_settle_ignores_battle_rewards() {
        let mut session = session_with(vec![card(1, 0, 0)], 1000);
        let player = card(1, 0, 0);
        let weak = Card::new(CardId::from_u128(2), ArchetypeId::new(1), 0, 1, 1, 1);
        let rewards = Rewards {
            win: 1_000_000,
            loss: 1_000_000,
        };

        let report = Battle::new(&player, weak, BattleConfig::default(), rewards, ScriptedRng::new([0.5])).run();
        assert_eq!(report.outcome(), Outcome::Win);
        assert_eq!(report.gold(), 1_000_000);

        assert_eq!(session.settle(report), 1050);
    }

    #[test]
    fn test_settle_pays_configured_rewards() {
        let mut config = GameConfig::default();
        config.win_reward = 7;
        config.loss_reward = 3;
        let mut state = GameState::new(0);
        state.inventory.push(card(1, 0, 0));
        let mut session = GameSessionBuilder::new().seed(8).config(config).state(state).build();
        session.toggle_equip(CardId::from_u128(1)).unwrap();

        let mut expected = 0;
        for _ in 0..10 {
            let report = session.start_battle().unwrap().run();
            expected += match report.outcome() {
                Outcome::Win => 7,
                Outcome::Loss => 3,
            };
            assert_eq!(session.settle(report), expected);
        }
    }

    #[test]
    fn test_abandoned_battle_pays_nothing() {
        let mut session = session_with(vec![card(1, 0, 0)], 0);
        session.toggle_equip(CardId::from_u128(1)).unwrap();

        let mut battle = session.start_battle().unwrap();
        battle.next();
        battle.abandon();

        assert_eq!(session.gold(), 0);
        assert_eq!(session.inventory().len(), 1);
    }

    #[test]
    fn test_builder_repairs_dangling_selection() {
        let mut state = GameState::new(0);
        state.inventory.push(card(1, 0, 0));
        state.selection = Selection::of(CardId::from_u128(5));

        let session = GameSessionBuilder::new().state(state).build();
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_sorted_inventory() {
        let mut strong = card(1, 3, 0);
        strong.hp = 500;
        let session = session_with(vec![card(2, 0, 1), strong, card(3, 0, 2)], 0);

        let order: Vec<_> = session.sorted_inventory().iter().map(|c| c.id).collect();
        assert_eq!(
            order,
            vec![CardId::from_u128(1), CardId::from_u128(3), CardId::from_u128(2)]
        );
    }

    #[test]
    fn test_persist_and_load() {
        use crate::persist::MemoryStore;

        let mut session = GameSession::new(5);
        session.buy_pack().unwrap();
        let mut store = MemoryStore::new();
        session.persist(&mut store).unwrap();

        let loaded = GameSession::load(GameSessionBuilder::new(), &mut store).unwrap();
        assert_eq!(loaded.state(), session.state());
        assert_eq!(GameState::from_bytes(&session.snapshot().unwrap()).unwrap(), *session.state());
    }

    #[test]
    fn test_load_rejects_foreign_archetype() {
        use crate::persist::MemoryStore;

        let mut state = GameState::new(0);
        state.inventory.push(card(1, 40, 0));
        let mut store = MemoryStore::with_state(state);

        assert!(matches!(
            GameSession::load(GameSessionBuilder::new(), &mut store),
            Err(PersistError::UnknownArchetype { .. })
        ));
    }

    #[test]
    fn test_rng_checkpoint_resumes_stream() {
        let mut a = GameSession::new(11);
        a.buy_pack().unwrap();
        let checkpoint = a.rng_state();
        let state = a.state().clone();

        let mut b = GameSessionBuilder::new().state(state).rng_state(checkpoint).build();
        let next_a = a.buy_pack().unwrap();
        let next_b = b.buy_pack().unwrap();
        assert_eq!(next_a.cards, next_b.cards);
    }
}
