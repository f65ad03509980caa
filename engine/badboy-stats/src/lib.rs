//! # Bad Boy Stats
//!
//! Crime-severity scoring for NFL fantasy football reports. Public arrest
//! records (fetched by the `arrest-scraper` crate) are scored against a
//! configurable crime-category table and merged into per-player and
//! per-team-defense rollups, which the report renderer queries by player
//! identity.
//!
//! ## Architecture
//!
//! - **CrimeRankings**: category→points scoring table, loaded once per run
//! - **BadBoyAggregator**: merges arrest records into player/team rollups
//! - **BadBoyStore**: entity map with lazy zero-entry lookup semantics
//! - **SnapshotStore**: on-disk JSON snapshots for offline reuse
//! - **BadBoyStats**: run-mode orchestration (refresh / online / offline)

pub mod aggregator;
pub mod error;
pub mod rankings;
pub mod snapshot;
pub mod stats;
pub mod store;
pub mod types;

pub use aggregator::{Aggregation, BadBoyAggregator};
pub use error::{BadBoyError, Result};
pub use rankings::CrimeRankings;
pub use snapshot::SnapshotStore;
pub use stats::{BadBoyConfig, BadBoyStats};
pub use store::BadBoyStore;
pub use types::{BadBoyEntry, Offense, PlayerEntry, TeamEntry};
