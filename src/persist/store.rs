//! Save stores: where a `GameState` lives between sessions.

use std::fs;
use std::path::{Path, PathBuf};

use super::codec::DEFAULT_SAVE;
use super::error::Result;
use crate::core::GameState;

/// Load/save seam for game state.
pub trait SaveStore {
    /// Load the saved state, or the default state if nothing is saved.
    fn load(&mut self) -> Result<GameState>;

    /// Replace the saved state.
    fn save(&mut self, state: &GameState) -> Result<()>;
}

/// In-memory store, for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: Option<GameState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `state`.
    pub fn with_state(state: GameState) -> Self {
        Self { state: Some(state) }
    }

    pub fn get(&self) -> Option<&GameState> {
        self.state.as_ref()
    }
}

impl SaveStore for MemoryStore {
    fn load(&mut self) -> Result<GameState> {
        Ok(self.state.clone().unwrap_or_default())
    }

    fn save(&mut self, state: &GameState) -> Result<()> {
        self.state = Some(state.clone());
        Ok(())
    }
}

/// JSON save file.
///
/// A missing file is created with the default save on first load.
/// Writes go to a temp file that is then renamed over the save.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl SaveStore for JsonFileStore {
    fn load(&mut self) -> Result<GameState> {
        if !self.path.exists() {
            tracing::warn!("No save at {}, creating default", self.path.display());
            self.write_atomic(DEFAULT_SAVE)?;
            return GameState::from_json(DEFAULT_SAVE);
        }

        let json = fs::read_to_string(&self.path)?;
        let state = GameState::from_json(&json)?;
        tracing::debug!(
            gold = state.gold,
            cards = state.inventory.len(),
            "Loaded save from {}",
            self.path.display()
        );
        Ok(state)
    }

    fn save(&mut self, state: &GameState) -> Result<()> {
        self.write_atomic(&state.to_json()?)?;
        tracing::debug!("Saved state to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ArchetypeId, Card, CardId};

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), GameState::default());

        let mut state = GameState::new(12);
        state.inventory.push(Card::new(CardId::from_u128(1), ArchetypeId::new(0), 0, 1, 1, 1));
        store.save(&state).unwrap();

        assert_eq!(store.get(), Some(&state));
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn test_file_store_creates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saves").join("gamedata.json");
        let mut store = JsonFileStore::new(&path);

        let state = store.load().unwrap();
        assert_eq!(state.gold, 1000);
        assert!(state.inventory.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_SAVE);
    }

    #[test]
    fn test_file_store_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("gamedata.json"));

        let mut state = GameState::new(430);
        state.auto_fuse = true;
        store.save(&state).unwrap();

        assert_eq!(store.load().unwrap(), state);
        assert!(!dir.path().join("gamedata.json.tmp").exists());
    }
}
