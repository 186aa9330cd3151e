//! Card bindings for Python.

use pyo3::prelude::*;

use crate::cards::Card;

/// Python wrapper for Card.
#[pyclass(name = "Card")]
#[derive(Clone, Debug)]
pub struct PyCard(pub Card);

#[pymethods]
impl PyCard {
    /// Card id as a UUID string.
    #[getter]
    fn id(&self) -> String {
        self.0.id.to_string()
    }

    /// Archetype index into the roster.
    #[getter]
    fn archetype(&self) -> u32 {
        self.0.archetype.raw()
    }

    #[getter]
    fn level(&self) -> u32 {
        self.0.level
    }

    #[getter]
    fn hp(&self) -> u64 {
        self.0.hp
    }

    #[getter]
    fn atk(&self) -> u64 {
        self.0.atk
    }

    #[getter]
    fn def(&self) -> u64 {
        self.0.def
    }

    fn total(&self) -> u64 {
        self.0.total()
    }

    fn __repr__(&self) -> String {
        format!(
            "Card(type={}, level={}, hp={}, atk={}, def={})",
            self.0.archetype.raw(),
            self.0.level,
            self.0.hp,
            self.0.atk,
            self.0.def
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
