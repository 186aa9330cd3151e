//! Heat-based battle state machine.
//!
//! ## Turn resolution
//!
//! Each round the player acts, then the opponent. On its turn a unit:
//!
//! 1. gains `heat_gain_min..=heat_gain_max` heat, capped at `heat_cap`
//! 2. self-harms for `floor(max_hp * self_harm_fraction)` with probability
//!    `heat / self_harm_divisor`, ending its turn
//! 3. otherwise deals `max(1, atk - target.def)`, multiplied by
//!    `crit_multiplier` (floored) with probability `heat / crit_divisor`
//!
//! The battle ends as soon as either unit is at or below zero HP, even in
//! the middle of a round. A unit that starts at zero HP never acts.

use super::event::{BattleEvent, BattleReport, Outcome, Rewards};
use super::unit::{BattleUnit, Side};
use crate::cards::{Card, CardGenerator, Roster};
use crate::core::{BattleConfig, GameConfig, RandomSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Engage,
    Turn(Side),
    Finish,
    Done,
}

/// A battle in progress.
///
/// Iterating yields events lazily; the stream is finite and cannot be
/// restarted. The battle never touches game state: only the
/// [`BattleReport`] of a finished battle carries a reward.
///
/// ```
/// use rust_gacha::battle::{Battle, BattleEvent, Outcome, Rewards};
/// use rust_gacha::cards::{ArchetypeId, Card, CardId};
/// use rust_gacha::core::{BattleConfig, GameRng};
///
/// let player = Card::new(CardId::from_u128(1), ArchetypeId::new(0), 0, 500, 80, 10);
/// let opponent = Card::new(CardId::from_u128(2), ArchetypeId::new(1), 0, 60, 5, 0);
///
/// let battle = Battle::new(&player, opponent, BattleConfig::default(), Rewards::default(), GameRng::new(1));
/// let report = battle.run();
/// assert_eq!(report.outcome(), Outcome::Win);
/// assert_eq!(report.gold(), 50);
/// ```
#[derive(Clone, Debug)]
pub struct Battle<R: RandomSource> {
    rng: R,
    config: BattleConfig,
    rewards: Rewards,
    player: BattleUnit,
    opponent: BattleUnit,
    opponent_card: Card,
    round: u32,
    phase: Phase,
}

impl<R: RandomSource> Battle<R> {
    /// Set up a battle between a player card and a given opponent.
    #[must_use]
    pub fn new(player: &Card, opponent: Card, config: BattleConfig, rewards: Rewards, rng: R) -> Self {
        Self {
            rng,
            config,
            rewards,
            player: BattleUnit::from_card(player),
            opponent: BattleUnit::from_card(&opponent),
            opponent_card: opponent,
            round: 1,
            phase: Phase::Engage,
        }
    }

    /// Current round (starts at 1).
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn player(&self) -> &BattleUnit {
        &self.player
    }

    #[must_use]
    pub fn opponent(&self) -> &BattleUnit {
        &self.opponent
    }

    /// The generated opponent card.
    #[must_use]
    pub fn opponent_card(&self) -> &Card {
        &self.opponent_card
    }

    /// Check if the terminal event has been emitted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Consume the battle, returning its report if it has finished.
    #[must_use]
    pub fn into_report(self) -> Option<BattleReport> {
        if self.is_finished() {
            Some(self.conclude())
        } else {
            None
        }
    }

    /// Drop an unfinished battle. No reward is produced.
    pub fn abandon(self) {
        if !self.is_finished() {
            tracing::info!(round = self.round, "Battle abandoned");
        }
    }

    /// Play the battle to the end, discarding events.
    #[must_use]
    pub fn run(mut self) -> BattleReport {
        self.by_ref().for_each(drop);
        self.conclude()
    }

    /// Play the battle to the end, keeping every event.
    #[must_use]
    pub fn run_with_events(mut self) -> (Vec<BattleEvent>, BattleReport) {
        let events: Vec<_> = self.by_ref().collect();
        (events, self.conclude())
    }

    fn outcome(&self) -> Outcome {
        if self.player.is_alive() {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    fn conclude(&self) -> BattleReport {
        let outcome = self.outcome();
        BattleReport {
            outcome,
            gold: self.rewards.for_outcome(outcome),
            rounds: self.round,
            player_hp: self.player.current_hp,
            opponent_hp: self.opponent.current_hp,
            opponent: self.opponent_card.clone(),
        }
    }

    fn take_turn(&mut self, side: Side) -> BattleEvent {
        let config = &self.config;
        let rng = &mut self.rng;
        let round = self.round;
        let (actor, target) = match side {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        };

        let gain = rng.range_inclusive(config.heat_gain_min, config.heat_gain_max);
        actor.heat = actor.heat.saturating_add(gain).min(config.heat_cap);
        let heat = actor.heat;

        if rng.chance(config.self_harm_chance(heat)) {
            let damage = (actor.max_hp as f64 * config.self_harm_fraction).floor() as i64;
            actor.current_hp = actor.current_hp.saturating_sub(damage);
            return BattleEvent::SelfHarm {
                round,
                side,
                damage,
                own_hp: actor.current_hp,
                heat,
            };
        }

        let base = actor.base_damage_against(target);
        if rng.chance(config.crit_chance(heat)) {
            let damage = (base as f64 * config.crit_multiplier).floor() as i64;
            target.current_hp = target.current_hp.saturating_sub(damage);
            BattleEvent::Critical {
                round,
                side,
                damage,
                target_hp: target.current_hp,
                heat,
            }
        } else {
            target.current_hp = target.current_hp.saturating_sub(base);
            BattleEvent::Hit {
                round,
                side,
                damage: base,
                target_hp: target.current_hp,
                heat,
            }
        }
    }
}

impl<R: RandomSource> Iterator for Battle<R> {
    type Item = BattleEvent;

    fn next(&mut self) -> Option<BattleEvent> {
        match self.phase {
            Phase::Engage => {
                self.phase = if self.player.is_alive() && self.opponent.is_alive() {
                    Phase::Turn(Side::Player)
                } else {
                    Phase::Finish
                };
                Some(BattleEvent::Engaged {
                    player: self.player,
                    opponent: self.opponent,
                })
            }
            Phase::Turn(side) => {
                let event = self.take_turn(side);
                tracing::debug!(?event, "Battle turn");

                self.phase = if !self.player.is_alive() || !self.opponent.is_alive() {
                    Phase::Finish
                } else if side == Side::Player {
                    Phase::Turn(Side::Opponent)
                } else {
                    self.round += 1;
                    Phase::Turn(Side::Player)
                };
                Some(event)
            }
            Phase::Finish => {
                self.phase = Phase::Done;
                let outcome = self.outcome();
                let gold = self.rewards.for_outcome(outcome);
                tracing::info!(?outcome, gold, rounds = self.round, "Battle finished");
                Some(BattleEvent::Finished {
                    outcome,
                    gold,
                    rounds: self.round,
                })
            }
            Phase::Done => None,
        }
    }
}

/// Builds battles for an equipped card against a generated opponent.
#[derive(Clone, Copy, Debug)]
pub struct BattleSimulator<'a> {
    roster: &'a Roster,
    game: &'a GameConfig,
    battle: &'a BattleConfig,
}

impl<'a> BattleSimulator<'a> {
    #[must_use]
    pub fn new(roster: &'a Roster, game: &'a GameConfig, battle: &'a BattleConfig) -> Self {
        Self { roster, game, battle }
    }

    /// Opponent level for a player card of `player_level`.
    ///
    /// One level up with `opponent_promote_chance`, then one level down
    /// (never below zero) with `opponent_demote_chance`. Both rolls are
    /// always drawn.
    pub fn opponent_level<R: RandomSource + ?Sized>(&self, player_level: u32, rng: &mut R) -> u32 {
        let promote = rng.chance(self.battle.opponent_promote_chance);
        let mut level = player_level.saturating_add(u32::from(promote));
        let demote = rng.chance(self.battle.opponent_demote_chance);
        if demote && level > 0 {
            level -= 1;
        }
        level
    }

    /// Roll an opponent and set up a battle against `player`.
    pub fn simulate<R: RandomSource>(&self, player: &Card, mut rng: R) -> Battle<R> {
        let level = self.opponent_level(player.level, &mut rng);
        let opponent = CardGenerator::new(self.roster, self.game).generate(level, &mut rng);

        tracing::info!(
            player = self.roster.name_of(player.archetype),
            player_level = player.level,
            opponent = self.roster.name_of(opponent.archetype),
            opponent_level = opponent.level,
            "Battle started"
        );

        Battle::new(player, opponent, self.battle.clone(), Rewards::from_config(self.game), rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ArchetypeId, CardId};
    use crate::core::{GameRng, ScriptedRng};

    fn card(id: u128, hp: u64, atk: u64, def: u64) -> Card {
        Card::new(CardId::from_u128(id), ArchetypeId::new(0), 0, hp, atk, def)
    }

    fn battle(player: Card, opponent: Card, script: &[f64]) -> Battle<ScriptedRng> {
        Battle::new(
            &player,
            opponent,
            BattleConfig::default(),
            Rewards::default(),
            ScriptedRng::new(script.iter().copied()),
        )
    }

    // heat +10, no self-harm, no crit (while heat < 99)
    const CALM: [f64; 3] = [0.0, 0.99, 0.99];

    #[test]
    fn test_first_exchange_uses_base_damage() {
        let mut b = battle(card(1, 100, 25, 10), card(2, 100, 20, 15), &CALM);

        assert!(matches!(b.next(), Some(BattleEvent::Engaged { .. })));
        assert_eq!(
            b.next(),
            Some(BattleEvent::Hit {
                round: 1,
                side: Side::Player,
                damage: 10,
                target_hp: 90,
                heat: 10,
            })
        );
        assert_eq!(
            b.next(),
            Some(BattleEvent::Hit {
                round: 1,
                side: Side::Opponent,
                damage: 10,
                target_hp: 90,
                heat: 10,
            })
        );
        assert_eq!(b.round(), 2);
    }

    #[test]
    fn test_player_kill_ends_round_early() {
        let b = battle(card(1, 100, 1000, 10), card(2, 50, 20, 15), &CALM);
        let (events, report) = b.run_with_events();

        assert_eq!(events.len(), 3);
        assert_eq!(events[1].side(), Some(Side::Player));
        assert_eq!(
            events[2],
            BattleEvent::Finished {
                outcome: Outcome::Win,
                gold: 50,
                rounds: 1,
            }
        );
        assert_eq!(report.outcome(), Outcome::Win);
        assert_eq!(report.opponent_hp(), 50 - 985);
    }

    #[test]
    fn test_critical_hit() {
        // heat +10, no self-harm, crit (0.0 < 0.1)
        let mut b = battle(card(1, 100, 25, 10), card(2, 100, 20, 15), &[0.0, 0.99, 0.0]);
        b.next();

        assert_eq!(
            b.next(),
            Some(BattleEvent::Critical {
                round: 1,
                side: Side::Player,
                damage: 15,
                target_hp: 85,
                heat: 10,
            })
        );
    }

    #[test]
    fn test_self_harm_skips_attack() {
        // heat +20, self-harm (0.0 < 20/300)
        let mut b = battle(card(1, 100, 25, 10), card(2, 100, 20, 15), &[0.999, 0.0]);
        b.next();

        assert_eq!(
            b.next(),
            Some(BattleEvent::SelfHarm {
                round: 1,
                side: Side::Player,
                damage: 10,
                own_hp: 90,
                heat: 20,
            })
        );
        assert_eq!(b.opponent().current_hp, 100);
    }

    #[test]
    fn test_self_harm_can_end_battle_on_own_turn() {
        // Both sides self-harm for 1 every turn; the player reaches 0 first.
        let b = battle(card(1, 10, 5, 5), card(2, 10, 5, 5), &[0.999, 0.0]);
        let (events, report) = b.run_with_events();

        assert_eq!(events.len(), 1 + 9 * 2 + 1 + 1);
        assert_eq!(report.outcome(), Outcome::Loss);
        assert_eq!(report.gold(), 10);
        assert_eq!(report.rounds(), 10);
        assert_eq!(report.player_hp(), 0);
        assert_eq!(report.opponent_hp(), 1);
    }

    #[test]
    fn test_opponent_self_harm_ends_battle_on_its_turn() {
        // Opponent loses 1 per turn and reaches 0 in round 10; the player
        // (11 HP, also losing 1 per turn) is still standing.
        let b = battle(card(1, 11, 5, 5), card(2, 10, 5, 5), &[0.999, 0.0]);
        let (events, report) = b.run_with_events();

        assert_eq!(events.len(), 1 + 10 * 2 + 1);
        assert_eq!(
            events[events.len() - 2],
            BattleEvent::SelfHarm {
                round: 10,
                side: Side::Opponent,
                damage: 1,
                own_hp: 0,
                heat: 100,
            }
        );
        assert_eq!(report.outcome(), Outcome::Win);
        assert_eq!(report.gold(), 50);
        assert_eq!(report.rounds(), 10);
        assert_eq!(report.player_hp(), 1);
        assert_eq!(report.opponent_hp(), 0);
    }

    #[test]
    fn test_dead_unit_never_acts() {
        let (events, report) = battle(card(1, 0, 20, 10), card(2, 100, 20, 15), &CALM).run_with_events();

        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], BattleEvent::Engaged { .. }));
        assert_eq!(
            events[1],
            BattleEvent::Finished {
                outcome: Outcome::Loss,
                gold: 10,
                rounds: 1,
            }
        );
        assert_eq!(report.opponent_hp(), 100);

        let (events, report) = battle(card(1, 100, 20, 10), card(2, 0, 20, 15), &CALM).run_with_events();
        assert_eq!(events.len(), 2);
        assert_eq!(report.outcome(), Outcome::Win);
        assert_eq!(report.player_hp(), 100);
    }

    #[test]
    fn test_heat_capped() {
        let mut b = battle(card(1, 1_000_000, 1, 1_000), card(2, 1_000_000, 1, 1_000), &[0.999, 0.999, 0.999]);
        for _ in 0..30 {
            b.next();
        }
        assert_eq!(b.player().heat, 100);
        assert_eq!(b.opponent().heat, 100);
    }

    #[test]
    fn test_stream_is_finite_and_not_restartable() {
        let mut b = battle(card(1, 100, 1000, 10), card(2, 50, 20, 15), &CALM);
        let count = b.by_ref().count();

        assert_eq!(count, 3);
        assert!(b.is_finished());
        assert_eq!(b.next(), None);
    }

    #[test]
    fn test_abandoned_battle_has_no_report() {
        let mut b = battle(card(1, 100, 25, 10), card(2, 100, 20, 15), &CALM);
        b.next();
        b.next();

        assert!(!b.is_finished());
        assert!(b.into_report().is_none());
    }

    #[test]
    fn test_opponent_level_drift() {
        let roster = Roster::standard();
        let game = GameConfig::default();
        let config = BattleConfig::default();
        let sim = BattleSimulator::new(&roster, &game, &config);

        assert_eq!(sim.opponent_level(3, &mut ScriptedRng::new([0.0, 0.99])), 4);
        assert_eq!(sim.opponent_level(3, &mut ScriptedRng::new([0.99, 0.99])), 3);
        assert_eq!(sim.opponent_level(3, &mut ScriptedRng::new([0.99, 0.0])), 2);
        assert_eq!(sim.opponent_level(3, &mut ScriptedRng::new([0.0, 0.0])), 3);
        assert_eq!(sim.opponent_level(0, &mut ScriptedRng::new([0.99, 0.0])), 0);
    }

    #[test]
    fn test_simulate_generates_opponent_at_drifted_level() {
        let roster = Roster::standard();
        let game = GameConfig::default();
        let config = BattleConfig::default();
        let sim = BattleSimulator::new(&roster, &game, &config);

        // promote, no demote, archetype 0, variance 1.0 x3
        let rng = ScriptedRng::new([0.0, 0.99, 0.0, 0.5, 0.5, 0.5]);
        let b = sim.simulate(&card(1, 100, 20, 10), rng);

        assert_eq!(b.opponent_card().level, 1);
        assert_eq!(b.opponent_card().hp, 300);
        assert_eq!(b.opponent().max_hp, 300);
    }

    #[test]
    fn test_random_battles_terminate_consistently() {
        let roster = Roster::standard();
        let game = GameConfig::default();
        let config = BattleConfig::default();
        let sim = BattleSimulator::new(&roster, &game, &config);
        let generator = CardGenerator::new(&roster, &game);
        let mut rng = GameRng::new(42);

        for _ in 0..200 {
            let player = generator.generate(rng.index(4) as u32, &mut rng);
            let (events, report) = sim.simulate(&player, rng.fork()).run_with_events();

            assert!(events.last().is_some_and(BattleEvent::is_terminal));
            assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);

            match report.outcome() {
                Outcome::Win => {
                    assert!(report.player_hp() > 0);
                    assert!(report.opponent_hp() <= 0);
                    assert_eq!(report.gold(), 50);
                }
                Outcome::Loss => {
                    assert!(report.player_hp() <= 0);
                    assert!(report.opponent_hp() > 0);
                    assert_eq!(report.gold(), 10);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_battle() {
        let roster = Roster::standard();
        let game = GameConfig::default();
        let config = BattleConfig::default();
        let sim = BattleSimulator::new(&roster, &game, &config);
        let player = card(1, 300, 40, 12);

        let (a, _) = sim.simulate(&player, GameRng::new(9)).run_with_events();
        let (b, _) = sim.simulate(&player, GameRng::new(9)).run_with_events();
        assert_eq!(a, b);
    }
}
