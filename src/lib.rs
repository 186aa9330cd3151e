//! # rust-gacha
//!
//! A collectible card engine: buy packs of randomly rolled cards, fuse
//! duplicates into higher tiers, and send an equipped card into an
//! automated battle against a generated opponent.
//!
//! ## Design Principles
//!
//! 1. **Injectable Randomness**: Every random draw goes through
//!    `RandomSource`. `GameRng` is seeded and forkable, `ScriptedRng`
//!    replays fixed values for tests.
//!
//! 2. **Single Writer**: `GameSession` owns gold, inventory and selection.
//!    Every mutation takes `&mut self`.
//!
//! 3. **Lazy Battles**: A battle is an iterator of `BattleEvent`s. The
//!    caller controls pacing, and dropping it abandons the fight.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, selection and persisted state
//! - `cards`: Archetypes, roster, cards and the card generator
//! - `fusion`: Cascading 5-for-1 fusion
//! - `battle`: Heat-based battle simulation
//! - `game`: The game session and its errors
//! - `persist`: Save codecs and stores

pub mod core;
pub mod cards;
pub mod fusion;
pub mod battle;
pub mod game;
pub mod persist;

// Re-export commonly used types
pub use crate::core::{
    toggle_equip, BattleConfig, GameConfig, GameRng, GameRngState, GameState, RandomSource, ScriptedRng,
    Selection,
};

pub use crate::cards::{Archetype, ArchetypeId, Card, CardGenerator, CardId, Roster, RosterError, Stats};

pub use crate::fusion::{FusionEngine, FusionOutcome, FusionStatus, FusionSummary};

pub use crate::battle::{Battle, BattleEvent, BattleReport, BattleSimulator, BattleUnit, Outcome, Rewards, Side};

pub use crate::game::{GameError, GameSession, GameSessionBuilder, PackOpening};

pub use crate::persist::{JsonFileStore, MemoryStore, PersistError, SaveStore, DEFAULT_SAVE};

#[cfg(feature = "python")]
pub mod python;
