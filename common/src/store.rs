use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

use log::debug;
use platform_dirs::AppDirs;
use thiserror::Error;

use crate::constants::{VOLCTL_STATE_DIR, VOLCTL_STATE_FILE};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no user data directory available")]
    NoStateDir,
    #[error("level store I/O failed")]
    Io(#[from] io::Error),
}

/// Single-slot persistence for the last known non-muted volume level.
///
/// The slot never holds 0; absence is the initial state and is distinct from
/// every numeric value.
pub trait LevelStore {
    fn store(&mut self, level: i32) -> Result<(), StoreError>;
    fn load(&self) -> Result<Option<i32>, StoreError>;
}

impl<T: LevelStore + ?Sized> LevelStore for &mut T {
    fn store(&mut self, level: i32) -> Result<(), StoreError> {
        (**self).store(level)
    }

    fn load(&self) -> Result<Option<i32>, StoreError> {
        (**self).load()
    }
}

/// Persists the level as a JSON integer in a per-user state file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new() -> Result<FileStore, StoreError> {
        let dirs = AppDirs::new(Some(VOLCTL_STATE_DIR), false).ok_or(StoreError::NoStateDir)?;
        Ok(FileStore {
            path: dirs.data_dir.join(VOLCTL_STATE_FILE),
        })
    }

    pub fn with_path(path: PathBuf) -> FileStore {
        FileStore { path }
    }
}

impl LevelStore for FileStore {
    fn store(&mut self, level: i32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&level).unwrap();
        File::create(&self.path)?.write_all(json.as_bytes())?;
        debug!("stored volume level {} at {}", level, self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<i32>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&json) {
            Ok(level) => Ok(Some(level)),
            Err(err) => {
                debug!("ignoring malformed level store: {}", err);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    #[test]
    fn test_store_and_load() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::with_path(dir.path().join("volume.json"));

        store.store(20).unwrap();
        assert_eq!(store.load().unwrap(), Some(20));

        store.store(35).unwrap();
        assert_eq!(store.load().unwrap(), Some(35));
    }

    #[test]
    fn test_missing_slot_is_absent() {
        let dir = tempdir().unwrap();
        let store = FileStore::with_path(dir.path().join("volume.json"));

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_malformed_slot_is_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("volume.json");
        fs::write(&path, "not a number").unwrap();

        let store = FileStore::with_path(path);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_store_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::with_path(dir.path().join("nested/state/volume.json"));

        store.store(7).unwrap();
        assert_eq!(store.load().unwrap(), Some(7));
    }
}
