//! Application services for statistics queries.

mod statistics;

pub use statistics::{StatisticsError, StatisticsResult, StatisticsService};
