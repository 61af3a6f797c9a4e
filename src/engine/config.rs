//! Allocation run configuration.

use crate::bidding::BidStrategy;
use crate::error::AllocationError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest supported round count (per-student round sets are 64-bit).
pub const MAX_ROUNDS: usize = 64;

/// Configuration for an allocation run.
///
/// # Examples
///
/// ```
/// use u_allocate::bidding::BidStrategy;
/// use u_allocate::engine::AllocationConfig;
///
/// let config = AllocationConfig::default()
///     .with_strategy(BidStrategy::TopK { k: 6 })
///     .with_round_count(6)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AllocationConfig {
    /// Which preferences become bids.
    pub strategy: BidStrategy,

    /// Number of rounds every student must be placed in.
    pub round_count: usize,

    /// Whether to fill remaining rounds with any open seat after the
    /// greedy pass. When disabled, missing rounds are only reported.
    pub fallback: bool,

    /// Random seed for tie-break keys. `None` draws a fresh seed, which is
    /// still reported on the result.
    pub seed: Option<u64>,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            strategy: BidStrategy::Exhaustive,
            round_count: 6,
            fallback: true,
            seed: None,
        }
    }
}

impl AllocationConfig {
    pub fn with_strategy(mut self, strategy: BidStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_round_count(mut self, n: usize) -> Self {
        self.round_count = n;
        self
    }

    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), AllocationError> {
        if self.round_count == 0 {
            return Err(AllocationError::InvalidConfig(
                "round_count must be positive".into(),
            ));
        }
        if self.round_count > MAX_ROUNDS {
            return Err(AllocationError::InvalidConfig(format!(
                "round_count must be at most {MAX_ROUNDS}, got {}",
                self.round_count
            )));
        }
        if let BidStrategy::TopK { k: 0 } = self.strategy {
            return Err(AllocationError::InvalidConfig(
                "top-k strategy needs k > 0".into(),
            ));
        }
        Ok(())
    }
}
