use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Fantasy roster slot used for team defense rollups.
pub const TEAM_DEFENSE_POS: &str = "D/ST";

/// A single scored offense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offense {
    /// Crime category, uppercase (e.g., "DUI")
    pub category: String,
    /// Points assigned to the category at scoring time
    pub points: u32,
}

/// Aggregated bad boy record for one player.
///
/// Invariants: `total_points` is the sum of all offense points and
/// `worst_offense_points` is the maximum single-offense value; both are
/// maintained by [`record_offense`](Self::record_offense).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    /// Team abbreviation at scoring time
    pub team: String,
    /// Position code (e.g., "LB")
    pub pos: String,
    /// Every offense scored against this player, in processing order
    pub offenses: Vec<Offense>,
    pub total_points: u32,
    /// Category of the highest-scoring offense; `None` until an offense
    /// scores above zero
    pub worst_offense: Option<String>,
    pub worst_offense_points: u32,
}

impl PlayerEntry {
    /// Create a zero-valued entry.
    pub fn new(team: String, pos: String) -> Self {
        Self {
            team,
            pos,
            offenses: Vec::new(),
            total_points: 0,
            worst_offense: None,
            worst_offense_points: 0,
        }
    }

    /// Score one offense against this player.
    pub fn record_offense(&mut self, category: &str, points: u32) {
        self.offenses.push(Offense { category: category.to_string(), points });
        self.total_points += points;

        if points > self.worst_offense_points {
            self.worst_offense = Some(category.to_string());
            self.worst_offense_points = points;
        }
    }
}

/// Aggregated bad boy record for one team defense, rolled up from the
/// team's defensive players only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamEntry {
    /// Always the D/ST roster slot
    pub pos: String,
    /// Offending defensive players, by name
    pub players: HashMap<String, PlayerEntry>,
    pub total_points: u32,
    /// Names of offending defensive players (set semantics)
    pub offenders: BTreeSet<String>,
    /// Always equals `offenders.len()`
    pub num_offenders: u32,
    pub worst_offense: Option<String>,
    pub worst_offense_points: u32,
}

impl TeamEntry {
    pub fn new() -> Self {
        Self {
            pos: TEAM_DEFENSE_POS.to_string(),
            players: HashMap::new(),
            total_points: 0,
            offenders: BTreeSet::new(),
            num_offenders: 0,
            worst_offense: None,
            worst_offense_points: 0,
        }
    }

    /// Roll one defensive player's offense into the team aggregate.
    /// Repeat offenders collapse to a single entry in the offender set.
    pub fn record_offense(&mut self, player_name: &str, category: &str, points: u32) {
        self.total_points += points;
        self.offenders.insert(player_name.to_string());
        self.num_offenders = self.offenders.len() as u32;

        if points > self.worst_offense_points {
            self.worst_offense = Some(category.to_string());
            self.worst_offense_points = points;
        }
    }
}

impl Default for TeamEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// A scored entity: an individual player, or a team defense rollup.
///
/// Player names and team abbreviations share one keyspace in the store, so
/// the snapshot format carries an explicit `kind` tag instead of relying on
/// entry shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BadBoyEntry {
    Player(PlayerEntry),
    TeamDefense(TeamEntry),
}

impl BadBoyEntry {
    pub fn total_points(&self) -> u32 {
        match self {
            Self::Player(player) => player.total_points,
            Self::TeamDefense(team) => team.total_points,
        }
    }

    pub fn worst_offense(&self) -> Option<&str> {
        match self {
            Self::Player(player) => player.worst_offense.as_deref(),
            Self::TeamDefense(team) => team.worst_offense.as_deref(),
        }
    }

    pub fn worst_offense_points(&self) -> u32 {
        match self {
            Self::Player(player) => player.worst_offense_points,
            Self::TeamDefense(team) => team.worst_offense_points,
        }
    }

    /// Offender count; individual players always report 0.
    pub fn num_offenders(&self) -> u32 {
        match self {
            Self::Player(_) => 0,
            Self::TeamDefense(team) => team.num_offenders,
        }
    }

    pub fn pos(&self) -> &str {
        match self {
            Self::Player(player) => &player.pos,
            Self::TeamDefense(team) => &team.pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_totals_track_sum_and_max() {
        let mut entry = PlayerEntry::new("SEA".to_string(), "LB".to_string());
        entry.record_offense("DUI", 5);
        entry.record_offense("ASSAULT", 10);
        entry.record_offense("DISORDERLY CONDUCT", 2);

        assert_eq!(entry.total_points, 17);
        assert_eq!(entry.worst_offense.as_deref(), Some("ASSAULT"));
        assert_eq!(entry.worst_offense_points, 10);
        assert_eq!(entry.offenses.len(), 3);
    }

    #[test]
    fn test_zero_point_offense_does_not_set_worst() {
        let mut entry = PlayerEntry::new("SEA".to_string(), "LB".to_string());
        entry.record_offense("JAYWALKING", 0);

        assert_eq!(entry.total_points, 0);
        assert_eq!(entry.worst_offense, None);
        assert_eq!(entry.worst_offense_points, 0);
        assert_eq!(entry.offenses.len(), 1);
    }

    #[test]
    fn test_team_offender_set_deduplicates() {
        let mut team = TeamEntry::new();
        team.record_offense("Leroy Hill", "DUI", 5);
        team.record_offense("Leroy Hill", "ASSAULT", 10);

        assert_eq!(team.total_points, 15);
        assert_eq!(team.num_offenders, 1);
        assert_eq!(team.worst_offense.as_deref(), Some("ASSAULT"));
    }

    #[test]
    fn test_entry_accessors() {
        let mut player = PlayerEntry::new("SEA".to_string(), "LB".to_string());
        player.record_offense("DUI", 5);
        let entry = BadBoyEntry::Player(player);

        assert_eq!(entry.total_points(), 5);
        assert_eq!(entry.worst_offense(), Some("DUI"));
        assert_eq!(entry.num_offenders(), 0);
        assert_eq!(entry.pos(), "LB");

        let mut team = TeamEntry::new();
        team.record_offense("Leroy Hill", "DUI", 5);
        let entry = BadBoyEntry::TeamDefense(team);

        assert_eq!(entry.num_offenders(), 1);
        assert_eq!(entry.pos(), TEAM_DEFENSE_POS);
    }

    #[test]
    fn test_snapshot_format_is_kind_tagged() {
        let entry = BadBoyEntry::Player(PlayerEntry::new("SEA".to_string(), "LB".to_string()));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "player");

        let entry = BadBoyEntry::TeamDefense(TeamEntry::new());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "team_defense");
        assert_eq!(json["pos"], TEAM_DEFENSE_POS);

        let round_tripped: BadBoyEntry = serde_json::from_value(json).unwrap();
        assert_eq!(round_tripped, entry);
    }
}
