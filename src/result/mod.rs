//! Run output: the assignment batch, shortfall warnings and statistics.

mod stats;
mod types;

pub use stats::{RoundFill, RunStatistics, SchoolFill};
pub use types::{AllocationResult, Assignment, Origin, ShortfallWarning};
