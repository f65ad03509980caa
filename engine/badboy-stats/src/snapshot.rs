//! On-disk JSON snapshots of aggregated and raw arrest data
//!
//! Snapshots let a run reuse previously fetched data instead of hitting
//! the network, and are the only data source in offline mode. Both files
//! are written pretty-printed (two-space indent) for human diffing.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use arrest_scraper::types::ArrestRecord;

use crate::error::Result;
use crate::store::BadBoyStore;

/// File name of the aggregate store snapshot.
pub const BAD_BOY_DATA_FILE: &str = "bad_boy_data.json";

/// File name of the raw per-incident snapshot.
pub const BAD_BOY_RAW_DATA_FILE: &str = "bad_boy_raw_data.json";

/// Snapshot reader/writer rooted at a data directory.
pub struct SnapshotStore {
    data_dir: PathBuf,
    save_data: bool,
}

impl SnapshotStore {
    /// Create the snapshot store, creating the data directory if needed.
    pub fn new<P: AsRef<Path>>(data_dir: P, save_data: bool) -> Result<Self> {
        fs::create_dir_all(data_dir.as_ref())?;
        Ok(Self { data_dir: data_dir.as_ref().to_path_buf(), save_data })
    }

    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(BAD_BOY_DATA_FILE)
    }

    pub fn raw_data_path(&self) -> PathBuf {
        self.data_dir.join(BAD_BOY_RAW_DATA_FILE)
    }

    /// Load a previously saved store; empty when no snapshot exists.
    pub fn load(&self) -> Result<BadBoyStore> {
        let path = self.data_path();
        if !path.exists() {
            debug!("No bad boy snapshot at {:?}", path);
            return Ok(BadBoyStore::new());
        }

        debug!("Loading saved bad boy data.");
        let raw = fs::read_to_string(&path)?;
        let store = serde_json::from_str(&raw)?;
        Ok(store)
    }

    /// Write the aggregate store and the raw per-incident map; no-op
    /// unless saving is enabled.
    pub fn save(
        &self,
        store: &BadBoyStore,
        raw_records: &HashMap<String, ArrestRecord>,
    ) -> Result<()> {
        if !self.save_data {
            return Ok(());
        }

        debug!("Saving bad boy data and raw player crime data.");
        fs::write(self.data_path(), serde_json::to_string_pretty(store)?)?;
        fs::write(self.raw_data_path(), serde_json::to_string_pretty(raw_records)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BadBoyEntry, PlayerEntry, TeamEntry};

    fn sample_store() -> BadBoyStore {
        let mut store = BadBoyStore::new();

        let mut player = PlayerEntry::new("SEA".to_string(), "LB".to_string());
        player.record_offense("DUI", 5);
        player.record_offense("ASSAULT", 10);
        store.insert("Leroy Hill".to_string(), BadBoyEntry::Player(player.clone()));

        let mut team = TeamEntry::new();
        team.record_offense("Leroy Hill", "DUI", 5);
        team.record_offense("Leroy Hill", "ASSAULT", 10);
        team.players.insert("Leroy Hill".to_string(), player);
        store.insert("SEA".to_string(), BadBoyEntry::TeamDefense(team));

        store
    }

    #[test]
    fn test_round_trip_reproduces_store() {
        let dir = tempfile::tempdir().unwrap();
        let snapshots = SnapshotStore::new(dir.path(), true).unwrap();

        let store = sample_store();
        snapshots.save(&store, &HashMap::new()).unwrap();

        let loaded = snapshots.load().unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_missing_snapshot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshots = SnapshotStore::new(dir.path(), true).unwrap();
        assert!(snapshots.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_disabled_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let snapshots = SnapshotStore::new(dir.path(), false).unwrap();

        snapshots.save(&sample_store(), &HashMap::new()).unwrap();
        assert!(!snapshots.data_path().exists());
        assert!(!snapshots.raw_data_path().exists());
    }

    #[test]
    fn test_snapshot_is_two_space_indented() {
        let dir = tempfile::tempdir().unwrap();
        let snapshots = SnapshotStore::new(dir.path(), true).unwrap();

        snapshots.save(&sample_store(), &HashMap::new()).unwrap();
        let written = fs::read_to_string(snapshots.data_path()).unwrap();
        assert!(written.contains("\n  \""));
    }
}
