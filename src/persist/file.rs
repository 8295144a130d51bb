use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::PersistenceMedium;
use crate::error::Result;
use crate::snapshot::SavedState;
use crate::state::AppState;

/// Stores the snapshot as a JSON document on disk.
///
/// Writes go to a temp file in the same directory that is synced and then
/// renamed over the target, so a crash mid-write leaves the previous snapshot
/// intact. A failed write removes its temp file.
#[derive(Debug, Clone)]
pub struct JsonFileMedium {
    path: PathBuf,
}

impl JsonFileMedium {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl PersistenceMedium for JsonFileMedium {
    fn load(&self) -> Result<Option<SavedState>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("no snapshot at {}", self.path.display());
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        if raw.trim().is_empty() {
            return Ok(None);
        }

        let snapshot = serde_json::from_str::<Option<SavedState>>(&raw)?;
        log::info!("loaded snapshot from {}", self.path.display());
        Ok(snapshot)
    }

    fn save(&self, state: &AppState) -> Result<()> {
        let json = serde_json::to_vec(&SavedState::from(state))?;

        let dir = self.dir();
        fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&json)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|err| err.error)?;

        log::debug!("saved snapshot to {} ({} bytes)", self.path.display(), json.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::state::Chapter;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let medium = JsonFileMedium::new(dir.path().join("state.json"));
        assert!(medium.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let medium = JsonFileMedium::new(dir.path().join("nested").join("state.json"));

        let mut state = AppState::default();
        state.workspaces.playground.context.chapter = Chapter::SOURCE_3;
        medium.save(&state).unwrap();

        let loaded = medium.load().unwrap().unwrap();
        assert_eq!(loaded, SavedState::from(&state));

        let entries: Vec<_> = fs::read_dir(dir.path().join("nested"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("state.json")]);
    }

    #[test]
    fn failed_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("state.json");
        // A non-empty directory in the way makes the final rename fail.
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let medium = JsonFileMedium::new(&target);
        assert!(matches!(
            medium.save(&AppState::default()),
            Err(StoreError::Io(_))
        ));

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("state.json")]);
    }

    #[test]
    fn null_and_empty_files_load_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let medium = JsonFileMedium::new(&path);

        fs::write(&path, "null").unwrap();
        assert!(medium.load().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(medium.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileMedium::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }
}
