//! Fusion: merge full batches of duplicate cards into the next tier.
//!
//! See [`FusionEngine`] for the cascade rules.

mod buckets;
pub mod engine;

pub use engine::{FusionEngine, FusionOutcome, FusionStatus, FusionSummary};
