//! Bid construction and priority ordering.
//!
//! Every (student, school) preference with positive points becomes a
//! [`Bid`] stamped with a tie-break key drawn from a [`TieBreakSource`].
//! Bids are ranked by points (highest first), then by key (lowest first):
//!
//! - **Exhaustive**: every positive preference is a bid.
//! - **Top-K**: only each student's K best-ranked bids survive. Because the
//!   cut is taken after ranking, equal-point ties at the boundary are
//!   decided by the same keys that order the stream.
//!
//! The key source is injected by the caller so that a run can be replayed
//! exactly from a seed or a fixed key sequence.

mod builder;
mod types;

pub use builder::{build_bids, priority_order, ranked_bids, select_top_k, sort_bids};
pub use types::{Bid, BidStrategy, KeySequence, TieBreakSource};
