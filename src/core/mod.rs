//! Core engine types: randomness, configuration, selection and state.
//!
//! These are shared by the card generator, fusion engine, battle
//! simulator and game session.

pub mod config;
pub mod rng;
pub mod selection;
pub mod state;

pub use config::{BattleConfig, GameConfig};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedRng};
pub use selection::{toggle_equip, Selection};
pub use state::GameState;
