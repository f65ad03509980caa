use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use arrest_scraper::client::{fetch_all_arrests, ArrestSource};
use arrest_scraper::types::{ArrestRecord, NFL_TEAMS};

use crate::aggregator::{write_crime_categories_export, BadBoyAggregator};
use crate::error::{BadBoyError, Result};
use crate::rankings::CrimeRankings;
use crate::snapshot::SnapshotStore;
use crate::store::BadBoyStore;
use crate::types::BadBoyEntry;

/// Run configuration for bad boy data collection.
#[derive(Debug, Clone)]
pub struct BadBoyConfig {
    /// Directory holding the snapshot files
    pub data_dir: PathBuf,
    /// Path to the crime category scoring table
    pub crime_categories_path: PathBuf,
    /// Persist fetched data back to disk at end of run
    pub save_data: bool,
    /// Use only previously saved data; never touch the network
    pub offline: bool,
    /// Re-scrape even when a snapshot exists
    pub refresh: bool,
}

/// Bad boy scoring service.
///
/// Builds the store once per run, from a saved snapshot or by live
/// scraping, then serves player lookups to the report renderer.
pub struct BadBoyStats {
    store: BadBoyStore,
    raw_records: HashMap<String, ArrestRecord>,
    observed_categories: BTreeMap<String, u32>,
    snapshots: SnapshotStore,
}

impl BadBoyStats {
    /// Initialize per the configured run mode.
    ///
    /// Refresh re-scrapes unconditionally and overwrites any snapshot;
    /// a plain online run scrapes only when no snapshot is present;
    /// offline requires a non-empty snapshot and fails with a distinct
    /// error without one. The scoring table must load before anything
    /// else happens.
    pub async fn initialize(
        config: &BadBoyConfig,
        source: Option<&dyn ArrestSource>,
    ) -> Result<Self> {
        debug!("Initializing bad boy stats.");

        let rankings = CrimeRankings::load(&config.crime_categories_path)?;
        let snapshots = SnapshotStore::new(&config.data_dir, config.save_data)?;

        let mut store = BadBoyStore::new();
        let mut raw_records = HashMap::new();
        let mut observed_categories = BTreeMap::new();

        if !config.refresh {
            store = snapshots.load()?;
        }

        if (config.refresh || !config.offline) && store.is_empty() {
            debug!("Retrieving bad boy data from the web.");

            let source = source.ok_or_else(|| {
                BadBoyError::Fetch(anyhow::anyhow!("online run requested without an arrest source"))
            })?;

            let arrest_data = fetch_all_arrests(source).await?;
            let arrests_by_team = arrest_data.by_team();

            let mut aggregator = BadBoyAggregator::new(rankings);
            for team in NFL_TEAMS {
                if let Some(arrests) = arrests_by_team.get(team) {
                    aggregator.add_entries(team, arrests);
                }
            }

            let aggregation = aggregator.finish();
            store = aggregation.store;
            raw_records = aggregation.raw_records;
            observed_categories = aggregation.observed_categories;

            snapshots.save(&store, &raw_records)?;
        } else if config.offline && store.is_empty() {
            return Err(BadBoyError::MissingOfflineData(snapshots.data_path()));
        }

        if store.is_empty() {
            warn!(
                "NO bad boy records were loaded, please check your internet connection or the \
                 availability of \"https://www.usatoday.com/sports/nfl/arrests/\" and try \
                 generating a new report."
            );
        } else {
            info!("{} bad boy records loaded", store.len());
        }

        Ok(Self { store, raw_records, observed_categories, snapshots })
    }

    /// Look up a player's entry, creating a zero-valued one on a miss.
    pub fn lookup(
        &mut self,
        first_name: &str,
        last_name: &str,
        team_abbr: &str,
        position: &str,
    ) -> &BadBoyEntry {
        self.store.lookup(first_name, last_name, team_abbr, position)
    }

    pub fn worst_offense_for(
        &mut self,
        first_name: &str,
        last_name: &str,
        team_abbr: &str,
        position: &str,
    ) -> Option<String> {
        self.store.worst_offense_for(first_name, last_name, team_abbr, position)
    }

    pub fn total_points_for(
        &mut self,
        first_name: &str,
        last_name: &str,
        team_abbr: &str,
        position: &str,
    ) -> u32 {
        self.store.total_points_for(first_name, last_name, team_abbr, position)
    }

    pub fn num_offenders_for(
        &mut self,
        first_name: &str,
        last_name: &str,
        team_abbr: &str,
        position: &str,
    ) -> u32 {
        self.store.num_offenders_for(first_name, last_name, team_abbr, position)
    }

    /// Write the observed crime categories to a curation file. Only a
    /// scraping run observes categories; snapshot-only runs export nothing.
    pub fn write_crime_categories_export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_crime_categories_export(&self.observed_categories, path)
    }

    /// Persist the current store and raw records, honoring the save flag.
    pub fn save(&self) -> Result<()> {
        self.snapshots.save(&self.store, &self.raw_records)
    }

    pub fn store(&self) -> &BadBoyStore {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
