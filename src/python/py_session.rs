//! Session bindings for Python.

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::battle::Outcome;
use crate::cards::CardId;
use crate::core::GameState;
use crate::game::{GameError, GameSession, GameSessionBuilder};
use crate::persist::{JsonFileStore, PersistError};

use super::py_cards::PyCard;

fn game_err(e: GameError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn persist_err(e: PersistError) -> PyErr {
    match e {
        PersistError::Io(io) => PyIOError::new_err(io.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn parse_id(id: &str) -> PyResult<CardId> {
    id.parse()
        .map_err(|e| PyValueError::new_err(format!("invalid card id {id:?}: {e}")))
}

/// Python wrapper for GameSession.
#[pyclass(name = "GameSession")]
pub struct PyGameSession {
    inner: GameSession,
}

#[pymethods]
impl PyGameSession {
    /// Create a session, optionally from a JSON save blob.
    #[new]
    #[pyo3(signature = (seed = 42, save = None))]
    fn new(seed: u64, save: Option<&str>) -> PyResult<Self> {
        let mut builder = GameSessionBuilder::new().seed(seed);
        if let Some(json) = save {
            builder = builder.state(GameState::from_json(json).map_err(persist_err)?);
        }
        Ok(Self { inner: builder.build() })
    }

    /// Load a session from a JSON save file, creating it if missing.
    #[staticmethod]
    #[pyo3(signature = (path, seed = 42))]
    fn open(path: &str, seed: u64) -> PyResult<Self> {
        let mut store = JsonFileStore::new(path);
        let inner = GameSession::load(GameSessionBuilder::new().seed(seed), &mut store).map_err(persist_err)?;
        Ok(Self { inner })
    }

    /// Write the state to a JSON save file.
    fn save(&self, path: &str) -> PyResult<()> {
        let mut store = JsonFileStore::new(path);
        self.inner.persist(&mut store).map_err(persist_err)
    }

    /// Current state as a JSON save blob.
    fn to_json(&self) -> PyResult<String> {
        self.inner.state().to_json().map_err(persist_err)
    }

    #[getter]
    fn gold(&self) -> u64 {
        self.inner.gold()
    }

    #[getter]
    fn auto_fuse(&self) -> bool {
        self.inner.state().auto_fuse
    }

    #[setter]
    fn set_auto_fuse(&mut self, enabled: bool) {
        self.inner.set_auto_fuse(enabled);
    }

    /// Inventory in display order.
    fn inventory(&self) -> Vec<PyCard> {
        self.inner.sorted_inventory().into_iter().cloned().map(PyCard).collect()
    }

    /// Id of the equipped card, if any.
    fn selected(&self) -> Option<String> {
        self.inner.selection().get().map(|id| id.to_string())
    }

    /// Buy a pack. Returns the new cards.
    fn buy_pack(&mut self) -> PyResult<Vec<PyCard>> {
        let opening = self.inner.buy_pack().map_err(game_err)?;
        Ok(opening.cards.into_iter().map(PyCard).collect())
    }

    /// Fuse the inventory. Returns the number of upgraded cards.
    fn fuse(&mut self) -> PyResult<usize> {
        Ok(self.inner.fuse().map_err(game_err)?.upgraded)
    }

    /// Equip or unequip a card. Returns the new selection.
    fn toggle_equip(&mut self, id: &str) -> PyResult<Option<String>> {
        let selection = self.inner.toggle_equip(parse_id(id)?).map_err(game_err)?;
        Ok(selection.get().map(|id| id.to_string()))
    }

    /// Run a full battle and settle it.
    ///
    /// Returns `(won, gold_reward, events)` with events as JSON strings.
    fn battle(&mut self) -> PyResult<(bool, u64, Vec<String>)> {
        let battle = self.inner.start_battle().map_err(game_err)?;
        let (events, report) = battle.run_with_events();
        let events = events
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        let won = report.outcome() == Outcome::Win;
        let before = self.inner.gold();
        let reward = self.inner.settle(report).saturating_sub(before);
        Ok((won, reward, events))
    }

    fn __repr__(&self) -> String {
        format!(
            "GameSession(gold={}, cards={})",
            self.inner.gold(),
            self.inner.inventory().len()
        )
    }
}
