//! Card system: archetypes, roster, card instances and generation.
//!
//! ## Key Types
//!
//! - `ArchetypeId`: Position in the roster (the save format's `type`)
//! - `Archetype`: Static name and base stats
//! - `Roster`: Ordered, non-empty archetype list
//! - `CardId`: Opaque UUID identity
//! - `Card`: Inventory entry with level and rolled stats
//! - `CardGenerator`: Rolls new cards from a roster

pub mod archetype;
pub mod card;
pub mod generator;
pub mod roster;

pub use archetype::{Archetype, ArchetypeId, Stats};
pub use card::{Card, CardId};
pub use generator::CardGenerator;
pub use roster::{Roster, RosterError};
