//! Pure statistics computations.

mod aggregate;
mod percent;
mod priority;
mod user;

pub use aggregate::TaskStatistics;
pub use priority::PriorityDistribution;
pub use user::UserStatistics;
