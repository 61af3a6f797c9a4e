//! Session allocation engine.
//!
//! A run turns a roster snapshot into a capacity-respecting, round-by-round
//! placement in four steps:
//!
//! 1. Build and rank bids ([`crate::bidding`]).
//! 2. **Greedy pass**: sweep the ranked bids once, committing each to the
//!    earliest round open for the student and at the school.
//! 3. **Gap fill**: place short students into their missing rounds at any
//!    school with a free seat, at zero preference weight.
//! 4. Summarize the batch ([`crate::result::RunStatistics`]).
//!
//! The run is a single-threaded, in-memory computation. All randomness
//! enters through the tie-break keys, so a fixed key source gives a
//! byte-identical batch.

mod config;
mod fill;
mod greedy;
mod runner;
mod types;

pub use config::{AllocationConfig, MAX_ROUNDS};
pub use runner::{allocate, AllocationRunner};
pub use types::RoundSet;
