//! Bid-based session allocation.
//!
//! Places a fixed roster of students into a fixed roster of schools across
//! a number of parallel rounds (six by default), subject to per-school,
//! per-round capacity. Students express priority by spreading points over
//! schools; the engine ranks the resulting bids and fills seats greedily:
//!
//! - **Bidding**: preferences become bids ranked by points, with random
//!   tie-break keys drawn from an injectable, seedable source.
//! - **Greedy pass**: each bid takes the earliest round open for both the
//!   student and the school.
//! - **Gap fill**: students left short are placed in any open seat at zero
//!   preference weight; rounds that cannot be filled are reported as
//!   warnings, never papered over.
//! - **Statistics**: match counts, mean preference score, and fill rates.
//!
//! The engine is a heuristic, not an optimizer: it reproduces one greedy,
//! priority-ordered procedure exactly and makes no welfare or envy-freeness
//! guarantees.
//!
//! # Example
//!
//! ```
//! use u_allocate::engine::{allocate, AllocationConfig};
//! use u_allocate::model::{AllocationInput, Preference, School, Student};
//!
//! let input = AllocationInput::new(
//!     vec![Student::new(1, "Ada"), Student::new(2, "Ben")],
//!     vec![School::new(1, "North", [1; 6]), School::new(2, "South", [1; 6])],
//!     vec![Preference::new(1, 1, 700), Preference::new(2, 1, 300)],
//! );
//! let result = allocate(&input, &AllocationConfig::default().with_seed(42)).unwrap();
//!
//! assert!(result.warnings.is_empty());
//! assert_eq!(result.assignments.len(), 12);
//! ```

pub mod bidding;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod model;
pub mod report;
pub mod result;
pub mod store;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use engine::{allocate, AllocationConfig, AllocationRunner};
pub use error::AllocationError;
pub use model::AllocationInput;
pub use result::AllocationResult;
