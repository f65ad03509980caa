//! Scraper for the USA Today NFL arrest database
//!
//! This crate fetches public arrest records per NFL team from the USA Today
//! database and normalizes them into stable records for bad boy scoring.
//! Requests are sequential and fail fast: a network or parse error aborts
//! the fetch for the run, with no retry and no partial-result salvage.

pub mod client;
pub mod types;

pub use client::{
    fetch_all_arrests, fetch_team_arrests, ArrestPage, ArrestSource, UsaTodayArrestClient,
    PAGE_SIZE,
};
pub use types::{ArrestData, ArrestRecord, PositionType};
