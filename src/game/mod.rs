//! Game session and its errors.

pub mod error;
pub mod session;

pub use error::{GameError, Result};
pub use session::{GameSession, GameSessionBuilder, PackOpening};
