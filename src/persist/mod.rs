//! Persistence: JSON and bincode codecs for `GameState`, and save stores.
//!
//! Nothing in the core algorithms touches this module; the session loads
//! and stores state through the [`SaveStore`] seam.

mod codec;
mod error;
mod store;

pub use codec::DEFAULT_SAVE;
pub use error::{PersistError, Result};
pub use store::{JsonFileStore, MemoryStore, SaveStore};
