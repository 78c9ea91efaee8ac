//! Core data models for volleyball scouting.

mod athlete;
mod fundamental;
mod ids;
mod outcome;
mod stats;

pub use athlete::*;
pub use fundamental::*;
pub use ids::*;
pub use outcome::*;
pub use stats::*;
