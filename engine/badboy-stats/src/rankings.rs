use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::Result;

/// Crime-severity scoring table: uppercase crime category to point value.
///
/// Loaded once at initialization and immutable for the rest of the run.
/// Scoring unknown categories (default 0, warning logged) is handled by the
/// aggregator, not here.
#[derive(Debug, Clone, Default)]
pub struct CrimeRankings {
    scores: HashMap<String, u32>,
}

impl CrimeRankings {
    /// Load the scoring table from a JSON resource file.
    ///
    /// A missing or malformed file is fatal: without the table every crime
    /// would silently score 0.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let scores: HashMap<String, u32> = serde_json::from_str(&raw)?;
        info!("Loaded {} crime categories from {:?}", scores.len(), path.as_ref());
        Ok(Self { scores })
    }

    /// Build a table from already-loaded scores.
    pub fn from_scores(scores: HashMap<String, u32>) -> Self {
        Self { scores }
    }

    /// Point value for a crime category, `None` when the category is unknown.
    pub fn points_for(&self, category: &str) -> Option<u32> {
        self.scores.get(category).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"DUI": 5, "ASSAULT": 10}}"#).unwrap();

        let rankings = CrimeRankings::load(file.path()).unwrap();
        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings.points_for("DUI"), Some(5));
        assert_eq!(rankings.points_for("ASSAULT"), Some(10));
        assert_eq!(rankings.points_for("JAYWALKING"), None);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        assert!(CrimeRankings::load("/nonexistent/crime_categories.json").is_err());
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(CrimeRankings::load(file.path()).is_err());
    }
}
