//! Storage collaborator seam.
//!
//! The engine performs no I/O. A store supplies the roster snapshot and
//! receives the finished batch in one call, which replaces whatever batch
//! it held before. Callers must not run two allocations against the same
//! store concurrently.

use crate::engine::{AllocationConfig, AllocationRunner};
use crate::error::AllocationError;
use crate::model::AllocationInput;
use crate::result::AllocationResult;

/// Source of roster snapshots and sink for result batches.
pub trait AllocationStore {
    /// Error raised by the backing storage.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Reads the current roster.
    fn load(&self) -> Result<AllocationInput, Self::Error>;

    /// Atomically replaces the stored result batch.
    fn replace_results(&mut self, result: &AllocationResult) -> Result<(), Self::Error>;
}

/// Loads a snapshot, runs the allocation and applies the batch once.
///
/// Nothing is written if loading, validation or the run itself fails.
pub fn run_and_apply<S: AllocationStore>(
    store: &mut S,
    config: &AllocationConfig,
) -> Result<AllocationResult, AllocationError> {
    let input = store
        .load()
        .map_err(|e| AllocationError::Store(Box::new(e)))?;
    let result = AllocationRunner::run(&input, config)?;
    store
        .replace_results(&result)
        .map_err(|e| AllocationError::Store(Box::new(e)))?;
    tracing::info!(
        assignments = result.assignments.len(),
        "result batch applied"
    );
    Ok(result)
}

/// In-memory store holding one roster and the latest batch.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    input: AllocationInput,
    results: Option<AllocationResult>,
}

impl MemoryStore {
    pub fn new(input: AllocationInput) -> Self {
        Self {
            input,
            results: None,
        }
    }

    /// The most recently applied batch.
    pub fn results(&self) -> Option<&AllocationResult> {
        self.results.as_ref()
    }

    /// Drops the stored batch.
    pub fn clear_results(&mut self) {
        self.results = None;
    }
}

impl AllocationStore for MemoryStore {
    type Error = std::convert::Infallible;

    fn load(&self) -> Result<AllocationInput, Self::Error> {
        Ok(self.input.clone())
    }

    fn replace_results(&mut self, result: &AllocationResult) -> Result<(), Self::Error> {
        self.results = Some(result.clone());
        Ok(())
    }
}
