//! Bid types and the tie-break key source.

use crate::model::{SchoolId, StudentId};
use rand::{Rng, RngCore};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A ranked candidate placement derived from one preference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bid {
    pub student_id: StudentId,
    pub school_id: SchoolId,
    pub points: u32,

    /// Uniform draw in `[0, 1)`; orders bids with equal points.
    pub key: f64,
}

/// Which preferences become bids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum BidStrategy {
    /// Every positive-points preference is a bid.
    #[default]
    Exhaustive,

    /// Only each student's `k` highest-ranked preferences are bids.
    TopK {
        /// Bids kept per student. Must be positive.
        k: usize,
    },
}

/// Source of tie-break keys.
///
/// Implemented for every [`RngCore`], so a seeded generator can be passed
/// directly. Tests that need an exact ordering use [`KeySequence`].
pub trait TieBreakSource {
    /// Returns the next key, uniform in `[0, 1)`.
    fn next_key(&mut self) -> f64;
}

impl<R: RngCore> TieBreakSource for R {
    fn next_key(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// A fixed list of keys handed out in order.
///
/// Wraps around to the first key once exhausted. An empty sequence
/// yields `0.0` for every draw.
#[derive(Debug, Clone, Default)]
pub struct KeySequence {
    keys: Vec<f64>,
    cursor: usize,
}

impl KeySequence {
    pub fn new(keys: impl IntoIterator<Item = f64>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Number of keys handed out so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl TieBreakSource for KeySequence {
    fn next_key(&mut self) -> f64 {
        if self.keys.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let key = self.keys[self.cursor % self.keys.len()];
        self.cursor += 1;
        key
    }
}
