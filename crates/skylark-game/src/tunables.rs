//! Persistence for player tunables
//!
//! Tunables live as pretty-printed JSON in the user's data directory so they
//! can be tweaked between runs. A play session snapshots the in-memory values
//! first and puts them back when it ends.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::player::{PlayerData, PlayerDataAsset};

/// File name of the stored tunables
pub const PLAYER_DATA_FILE: &str = "player_data.json";

/// Errors that can occur while loading or saving tunables.
#[derive(Debug, thiserror::Error)]
pub enum TunablesError {
    #[error("no user data directory available on this platform")]
    NoDataDir,

    #[error("I/O error on '{0}': {1}")]
    Io(PathBuf, #[source] io::Error),

    #[error("failed to parse tunables in '{0}': {1}")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("invalid tunables in '{0}': {1} is out of range")]
    Invalid(PathBuf, &'static str),

    #[error("failed to serialize tunables: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// What [`PlayerDataStore::load_into`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Values were read from disk
    Loaded,
    /// No file existed; the current values were written out
    CreatedDefaults,
}

/// JSON file holding [`PlayerData`]
#[derive(Debug, Clone)]
pub struct PlayerDataStore {
    path: PathBuf,
}

impl PlayerDataStore {
    /// Store at `<data_dir>/skylark/player_data.json`
    pub fn new() -> Result<Self, TunablesError> {
        let dir = dirs::data_dir().ok_or(TunablesError::NoDataDir)?;
        Ok(Self::at(dir.join("skylark").join(PLAYER_DATA_FILE)))
    }

    /// Store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and validate the stored values
    pub fn read(&self) -> Result<PlayerData, TunablesError> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| TunablesError::Io(self.path.clone(), e))?;
        let data: PlayerData = serde_json::from_str(&contents)
            .map_err(|e| TunablesError::Parse(self.path.clone(), e))?;
        if let Some(field) = data.invalid_field() {
            return Err(TunablesError::Invalid(self.path.clone(), field));
        }
        Ok(data)
    }

    /// Write `data`, creating parent directories as needed
    pub fn write(&self, data: &PlayerData) -> Result<(), TunablesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| TunablesError::Io(parent.to_path_buf(), e))?;
        }
        let json = serde_json::to_string_pretty(data).map_err(TunablesError::Serialize)?;
        fs::write(&self.path, json).map_err(|e| TunablesError::Io(self.path.clone(), e))?;
        info!(path = %self.path.display(), "Saved player tunables");
        Ok(())
    }

    /// Overwrite the asset with the stored values.
    ///
    /// When no file exists yet the asset's current values are saved instead.
    pub fn load_into(&self, asset: &PlayerDataAsset) -> Result<LoadOutcome, TunablesError> {
        if !self.exists() {
            self.write(&asset.snapshot())?;
            return Ok(LoadOutcome::CreatedDefaults);
        }

        let data = self.read()?;
        asset.replace(data);
        info!(path = %self.path.display(), "Loaded player tunables");
        Ok(LoadOutcome::Loaded)
    }
}

/// A tuning session over a shared asset.
///
/// The asset's values at [`TunablesSession::begin`] are restored by
/// [`TunablesSession::finish`], so edits made while playing never leak back
/// into the defaults.
#[derive(Debug)]
pub struct TunablesSession {
    store: PlayerDataStore,
    asset: PlayerDataAsset,
    snapshot: PlayerData,
    outcome: LoadOutcome,
}

impl TunablesSession {
    /// Snapshot the asset, then apply the stored tunables
    pub fn begin(store: PlayerDataStore, asset: PlayerDataAsset) -> Result<Self, TunablesError> {
        let snapshot = asset.snapshot();
        let outcome = store.load_into(&asset)?;
        Ok(Self {
            store,
            asset,
            snapshot,
            outcome,
        })
    }

    /// What the last load did
    pub fn outcome(&self) -> LoadOutcome {
        self.outcome
    }

    /// Get the backing store
    pub fn store(&self) -> &PlayerDataStore {
        &self.store
    }

    /// Persist the asset's current values
    pub fn save_current(&self) -> Result<(), TunablesError> {
        self.store.write(&self.asset.snapshot())
    }

    /// Re-read the file into the asset
    pub fn reload(&mut self) -> Result<LoadOutcome, TunablesError> {
        self.outcome = self.store.load_into(&self.asset)?;
        Ok(self.outcome)
    }

    /// Put back the values the asset had before the session
    pub fn finish(self) -> PlayerData {
        self.asset.replace(self.snapshot.clone());
        info!("Restored player tunables snapshot");
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (PathBuf, PlayerDataStore) {
        let dir = std::env::temp_dir().join(format!("skylark-test-{}", uuid::Uuid::new_v4()));
        let store = PlayerDataStore::at(dir.join("nested").join(PLAYER_DATA_FILE));
        (dir, store)
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let (dir, store) = temp_store();
        let asset = PlayerDataAsset::default();

        assert_eq!(store.load_into(&asset).unwrap(), LoadOutcome::CreatedDefaults);
        assert!(store.exists());
        assert_eq!(store.read().unwrap(), PlayerData::default());

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_saved_values_load_back() {
        let (dir, store) = temp_store();
        let tuned = PlayerData {
            base_speed: 8.0,
            coyote_time: 0.2,
            ..Default::default()
        };
        store.write(&tuned).unwrap();

        let asset = PlayerDataAsset::default();
        assert_eq!(store.load_into(&asset).unwrap(), LoadOutcome::Loaded);
        assert_eq!(asset.snapshot(), tuned);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let (dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        let err = store.load_into(&PlayerDataAsset::default()).unwrap_err();
        assert!(matches!(err, TunablesError::Parse(..)));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_zero_apex_time_is_rejected() {
        let (dir, store) = temp_store();
        store
            .write(&PlayerData {
                time_to_jump_apex: 0.0,
                ..Default::default()
            })
            .unwrap();

        let asset = PlayerDataAsset::default();
        let err = store.load_into(&asset).unwrap_err();
        assert!(matches!(err, TunablesError::Invalid(_, "time_to_jump_apex")));
        assert_eq!(asset.snapshot(), PlayerData::default());

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_session_restores_snapshot() {
        let (dir, store) = temp_store();
        store
            .write(&PlayerData {
                max_jump_height: 5.0,
                ..Default::default()
            })
            .unwrap();

        let asset = PlayerDataAsset::default();
        let mut session = TunablesSession::begin(store, asset.clone()).unwrap();
        assert_eq!(session.outcome(), LoadOutcome::Loaded);
        assert_eq!(asset.read().max_jump_height, 5.0);

        asset.write().base_speed = 12.0;
        session.save_current().unwrap();
        asset.write().base_speed = 1.0;
        session.reload().unwrap();
        assert_eq!(asset.read().base_speed, 12.0);

        let restored = session.finish();
        assert_eq!(restored, PlayerData::default());
        assert_eq!(asset.snapshot(), PlayerData::default());

        fs::remove_dir_all(dir).ok();
    }
}
