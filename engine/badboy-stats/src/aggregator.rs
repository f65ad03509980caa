use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::warn;

use arrest_scraper::types::ArrestRecord;

use crate::error::Result;
use crate::rankings::CrimeRankings;
use crate::store::BadBoyStore;
use crate::types::{BadBoyEntry, PlayerEntry, TeamEntry};

/// Merges normalized arrest records into player and team-defense rollups.
///
/// Owns all per-run aggregation state; nothing leaks across runs. Totals
/// and worst offenses are built from sums and maxes, so processing order
/// across arrests never changes the final aggregates.
pub struct BadBoyAggregator {
    rankings: CrimeRankings,
    players: HashMap<String, PlayerEntry>,
    teams: HashMap<String, TeamEntry>,
    raw_records: HashMap<String, ArrestRecord>,
    observed_categories: BTreeMap<String, u32>,
}

/// Everything one aggregation run produces.
pub struct Aggregation {
    pub store: BadBoyStore,
    /// Raw per-incident records, keyed by player name (last incident wins)
    pub raw_records: HashMap<String, ArrestRecord>,
    /// Every distinct (category, score) pair seen, for export
    pub observed_categories: BTreeMap<String, u32>,
}

impl BadBoyAggregator {
    pub fn new(rankings: CrimeRankings) -> Self {
        Self {
            rankings,
            players: HashMap::new(),
            teams: HashMap::new(),
            raw_records: HashMap::new(),
            observed_categories: BTreeMap::new(),
        }
    }

    /// Merge one team's arrest records into the aggregates.
    ///
    /// Each arrest scores against the player's entry; arrests by defensive
    /// players additionally roll into the team's D/ST entry. A category
    /// missing from the scoring table scores 0 with a warning, and every
    /// observed category lands in the export table.
    pub fn add_entries(&mut self, team_abbr: &str, arrests: &[ArrestRecord]) {
        if arrests.is_empty() {
            return;
        }

        let team = self.teams.entry(team_abbr.to_string()).or_default();

        for arrest in arrests {
            let category = arrest.crime.as_str();
            let points = self.rankings.points_for(category).unwrap_or_else(|| {
                warn!("Crime ranking not found: {:?}. Assigning score of 0.", category);
                0
            });

            // every category seen goes to the export table; unknown ones
            // surface there at 0 for manual curation
            self.observed_categories.insert(category.to_string(), points);
            self.raw_records.insert(arrest.name.clone(), arrest.clone());

            let player = self.players.entry(arrest.name.clone()).or_insert_with(|| {
                PlayerEntry::new(team_abbr.to_string(), arrest.position.clone())
            });
            player.record_offense(category, points);

            if arrest.position_type.is_defense() {
                team.record_offense(&arrest.name, category, points);
            }
        }
    }

    /// Finish the run: copy final player states into their team rollups and
    /// assemble the store. Team entries overwrite colliding player keys,
    /// matching the store's accepted keyspace quirk.
    pub fn finish(self) -> Aggregation {
        let Self { rankings: _, players, teams, raw_records, observed_categories } = self;

        let mut finished_teams = Vec::with_capacity(teams.len());
        for (team_abbr, mut team) in teams {
            for name in team.offenders.clone() {
                if let Some(player) = players.get(&name) {
                    team.players.insert(name, player.clone());
                }
            }
            finished_teams.push((team_abbr, team));
        }

        let mut store = BadBoyStore::new();
        for (name, player) in players {
            store.insert(name, BadBoyEntry::Player(player));
        }
        for (team_abbr, team) in finished_teams {
            store.insert(team_abbr, BadBoyEntry::TeamDefense(team));
        }

        Aggregation { store, raw_records, observed_categories }
    }
}

/// Write category→score observations, sorted by category name, to a side
/// file for manual curation of the scoring table.
pub fn write_crime_categories_export<P: AsRef<Path>>(
    observed_categories: &BTreeMap<String, u32>,
    path: P,
) -> Result<()> {
    let json = serde_json::to_string_pretty(observed_categories)?;
    fs::write(path, json)?;
    Ok(())
}
