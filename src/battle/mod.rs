//! Turn-based battle simulation.
//!
//! - `BattleUnit`: battle-scope copy of a card with HP and heat
//! - `BattleEvent`: one observable step
//! - `Battle`: lazy event iterator for one fight
//! - `BattleSimulator`: rolls an opponent and sets up a `Battle`
//! - `BattleReport`: settled into the session for the gold reward

pub mod event;
pub mod simulator;
pub mod unit;

pub use event::{BattleEvent, BattleReport, Outcome, Rewards};
pub use simulator::{Battle, BattleSimulator};
pub use unit::{BattleUnit, Side};
