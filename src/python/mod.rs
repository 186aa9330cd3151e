//! Python bindings for the gacha engine.
//!
//! # Quick Start
//!
//! ```python
//! import rust_gacha as gacha
//!
//! session = gacha.GameSession.open("gamedata.json")
//! session.auto_fuse = True
//! cards = session.buy_pack()
//!
//! session.toggle_equip(session.inventory()[0].id)
//! won, reward, events = session.battle()
//! session.save("gamedata.json")
//! ```

use pyo3::prelude::*;

mod py_cards;
mod py_session;

pub use py_cards::*;
pub use py_session::*;

/// rust-gacha: card packs, fusion and battles.
#[pymodule]
fn rust_gacha(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCard>()?;
    m.add_class::<PyGameSession>()?;
    Ok(())
}
