//! Recoverable game errors.
//!
//! None of these leave state half-changed: an operation that returns an
//! error has not mutated the session.

use thiserror::Error;

use crate::cards::CardId;

/// Errors surfaced by `GameSession` operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u64, available: u64 },

    #[error("not enough cards to fuse: need {needed}, have {available}")]
    InsufficientCards { needed: usize, available: usize },

    #[error("no card equipped")]
    NoEquippedUnit,

    #[error("card {0} is not in the inventory")]
    UnknownCard(CardId),
}

pub type Result<T> = std::result::Result<T, GameError>;
