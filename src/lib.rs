//! # Volley Scout
//!
//! Live volleyball scouting: tally the outcome of every touch, derive
//! per-player and team statistics, and render match reports.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (athletes, outcomes, fundamental stats)
//! - **calculate**: Derived metrics (attempts, points, errors, percentages)
//! - **roster**: Roster file parsing and the athlete registry
//! - **session**: The scouting session for one match
//! - **report**: Text, HTML and JSON report rendering
//! - **storage**: JSONL event logs and report exports
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod report;
pub mod roster;
pub mod session;
pub mod storage;

pub use models::*;
