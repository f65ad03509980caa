use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Canonical NFL team abbreviations used for per-team arrest queries.
pub const NFL_TEAMS: [&str; 32] = [
    "ARI", "ATL", "BAL", "BUF", "CAR", "CHI", "CIN", "CLE", "DAL", "DEN", "DET", "GB", "HOU",
    "IND", "JAX", "KC", "LAR", "LAC", "LV", "MIA", "MIN", "NE", "NO", "NYG", "NYJ", "PHI", "PIT",
    "SEA", "SF", "TB", "TEN", "WAS",
];

/// Alternate abbreviations used by some upstream feeds, mapped to the
/// canonical form.
pub const TEAM_ABBREVIATION_ALIASES: [(&str, &str); 3] =
    [("JAC", "JAX"), ("LA", "LAR"), ("WSH", "WAS")];

/// Resolve a team abbreviation to its canonical form.
///
/// Returns `None` when the abbreviation is neither canonical nor a known
/// alias; callers decide whether to keep the original value or fall back.
pub fn canonical_team(abbr: &str) -> Option<&'static str> {
    NFL_TEAMS
        .iter()
        .find(|&&team| team == abbr)
        .copied()
        .or_else(|| {
            TEAM_ABBREVIATION_ALIASES
                .iter()
                .find(|(alias, _)| *alias == abbr)
                .map(|(_, canonical)| *canonical)
        })
}

/// Position type groupings used for fantasy rollups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionType {
    /// Defensive players, rolled up into team D/ST entries
    #[serde(rename = "D")]
    Defense,
    #[serde(rename = "O")]
    Offense,
    #[serde(rename = "S")]
    SpecialTeams,
    #[serde(rename = "L")]
    OffensiveLine,
    #[serde(rename = "C")]
    Coaching,
}

impl PositionType {
    /// Derive the position type from a position code as reported by the
    /// arrest database. An unrecognized code is an error: scoring a player
    /// under the wrong rollup is worse than aborting the run.
    pub fn from_position(position: &str) -> Result<Self> {
        let position_type = match position {
            "C" | "CB" | "DB" | "DE" | "DE/DT" | "DT" | "LB" | "S" | "Safety" => Self::Defense,
            "FB" | "QB" | "RB" | "TE" | "WR" => Self::Offense,
            "K" | "P" => Self::SpecialTeams,
            "OG" | "OL" | "OT" => Self::OffensiveLine,
            "OC" => Self::Coaching,
            _ => bail!("Unrecognized player position: {position:?}"),
        };
        Ok(position_type)
    }

    pub fn is_defense(self) -> bool {
        self == Self::Defense
    }
}

/// One row of the arrest-search response, as served by the database.
#[derive(Debug, Clone, Deserialize)]
pub struct RawArrestRow {
    #[serde(rename = "First_name")]
    pub first_name: String,
    #[serde(rename = "Last_name")]
    pub last_name: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "Case_1")]
    pub case: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Outcome")]
    pub outcome: String,
}

/// Arrest-search response envelope: `{"data": {"Result": [...], "totalResults": n}}`.
#[derive(Debug, Deserialize)]
pub struct ArrestSearchResponse {
    pub data: ArrestSearchData,
}

#[derive(Debug, Deserialize)]
pub struct ArrestSearchData {
    #[serde(rename = "Result")]
    pub result: Vec<RawArrestRow>,
    #[serde(rename = "totalResults")]
    pub total_results: u32,
}

/// A normalized arrest record, one per scraped incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrestRecord {
    /// Player full name (e.g., "Leroy Hill")
    pub name: String,
    /// Team abbreviation; free agents are normalized to "FA"
    pub team: String,
    /// Incident date as reported by the feed
    pub date: String,
    /// Position code (e.g., "LB")
    pub position: String,
    /// Position type derived from the position code
    pub position_type: PositionType,
    /// Case type, uppercased (e.g., "ARREST")
    pub case: String,
    /// Crime category, uppercased (e.g., "DUI")
    pub crime: String,
    /// Incident description
    pub description: String,
    /// Legal outcome, if resolved
    pub outcome: String,
}

impl ArrestRecord {
    /// Normalize a raw response row. Fails on an unrecognized position code.
    pub fn from_raw(raw: RawArrestRow) -> Result<Self> {
        let position_type = PositionType::from_position(&raw.position)?;
        let team = if raw.team == "Free agent" || raw.team == "Free Agent" {
            "FA".to_string()
        } else {
            raw.team
        };

        Ok(Self {
            name: format!("{} {}", raw.first_name, raw.last_name),
            team,
            date: raw.date,
            position: raw.position,
            position_type,
            case: raw.case.to_uppercase(),
            crime: raw.category.to_uppercase(),
            description: raw.description,
            outcome: raw.outcome,
        })
    }
}

/// Container for all scraped arrest records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrestData {
    /// When this data was fetched
    pub fetched_at: DateTime<Utc>,
    /// Normalized arrest records across all teams
    pub records: Vec<ArrestRecord>,
}

impl ArrestData {
    /// Create a new container stamped with the current time
    pub fn new(records: Vec<ArrestRecord>) -> Self {
        Self { fetched_at: Utc::now(), records }
    }

    /// Group records by the team recorded on each incident
    pub fn by_team(&self) -> HashMap<String, Vec<ArrestRecord>> {
        let mut grouped: HashMap<String, Vec<ArrestRecord>> = HashMap::new();
        for record in &self.records {
            grouped.entry(record.team.clone()).or_default().push(record.clone());
        }
        grouped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
