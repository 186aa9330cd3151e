//! Persistence errors.

use thiserror::Error;

use crate::cards::{ArchetypeId, CardId};

/// Errors raised while loading or saving game state.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("duplicate card {0} in inventory")]
    DuplicateCard(CardId),

    #[error("card {id} has a zero stat")]
    InvalidStats { id: CardId },

    #[error("card {id} has unknown archetype {archetype}")]
    UnknownArchetype { id: CardId, archetype: ArchetypeId },
}

pub type Result<T> = std::result::Result<T, PersistError>;
