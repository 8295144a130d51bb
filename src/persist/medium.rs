use std::sync::{Mutex, PoisonError};

use crate::error::Result;
use crate::snapshot::SavedState;
use crate::state::AppState;

/// Where snapshots are read from at startup and written to afterwards.
///
/// Implementations decide the format and location. `load` returns `Ok(None)` when
/// nothing has been stored yet.
pub trait PersistenceMedium: Send + Sync {
    fn load(&self) -> Result<Option<SavedState>>;
    fn save(&self, state: &AppState) -> Result<()>;
}

/// In-process medium that keeps the last snapshot and records every save.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    stored: Mutex<Option<SavedState>>,
    saves: Mutex<Vec<AppState>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// A medium that already holds `snapshot`, as if written by an earlier run.
    pub fn with_snapshot(snapshot: SavedState) -> Self {
        Self {
            stored: Mutex::new(Some(snapshot)),
            saves: Mutex::new(Vec::new()),
        }
    }

    /// Every state passed to [`PersistenceMedium::save`], oldest first.
    pub fn saves(&self) -> Vec<AppState> {
        self.saves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// The snapshot `load` would currently return.
    pub fn stored(&self) -> Option<SavedState> {
        self.stored
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PersistenceMedium for MemoryMedium {
    fn load(&self) -> Result<Option<SavedState>> {
        Ok(self.stored())
    }

    fn save(&self, state: &AppState) -> Result<()> {
        *self.stored.lock().unwrap_or_else(PoisonError::into_inner) = Some(SavedState::from(state));
        self.saves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_medium_loads_nothing() {
        assert!(MemoryMedium::new().load().unwrap().is_none());
    }

    #[test]
    fn save_replaces_stored_snapshot() {
        let medium = MemoryMedium::new();
        let mut state = AppState::default();
        state.workspaces.playground.is_folder_mode_enabled = true;

        medium.save(&state).unwrap();

        let loaded = medium.load().unwrap().unwrap();
        assert_eq!(loaded.playground_is_folder_mode_enabled, Some(true));
        assert_eq!(medium.save_count(), 1);
        assert_eq!(medium.saves()[0], state);
    }
}
