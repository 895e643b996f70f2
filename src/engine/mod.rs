//! The draft-impact ranking engine: pure functions over a borrowed season.
//!
//! Pipeline: aggregate every team, rank the whole league, and only then
//! filter and sort for display.

pub mod aggregation;
pub mod error;
pub mod filter;
pub mod ranking;
pub mod report;
pub mod rolling;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::EngineError;
pub use filter::{charts, standings, StandingRow, View};
pub use report::team_report;
