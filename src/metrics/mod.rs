//! Aggregate journal statistics for the dashboard.

mod calculator;

pub use calculator::{EquityPoint, JournalStats, RBucket};
