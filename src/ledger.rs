//! Per-(school, round) seat counters owned by a single run.

use crate::model::{School, SchoolId};
use std::collections::HashMap;

/// Remaining seats for every (school, round) pair.
///
/// Schools are addressed by a dense slot index assigned in input order;
/// rounds are numbered from 1. Counters only ever decrease and never
/// drop below zero.
#[derive(Debug, Clone)]
pub struct CapacityLedger {
    round_count: usize,
    ids: Vec<SchoolId>,
    slots: HashMap<SchoolId, usize>,
    original: Vec<u32>,
    remaining: Vec<u32>,
}

impl CapacityLedger {
    /// Builds a ledger from configured capacities.
    ///
    /// Each school must carry exactly `round_count` capacities; see
    /// [`AllocationInput::validate`](crate::model::AllocationInput::validate).
    pub fn from_schools(schools: &[School], round_count: usize) -> Self {
        let mut original = Vec::with_capacity(schools.len() * round_count);
        for school in schools {
            original.extend(
                (0..round_count).map(|r| school.capacities.get(r).copied().unwrap_or(0)),
            );
        }
        Self {
            round_count,
            ids: schools.iter().map(|s| s.id).collect(),
            slots: schools.iter().enumerate().map(|(i, s)| (s.id, i)).collect(),
            remaining: original.clone(),
            original,
        }
    }

    pub fn round_count(&self) -> usize {
        self.round_count
    }

    pub fn school_count(&self) -> usize {
        self.ids.len()
    }

    /// Returns the slot index of a school.
    pub fn slot_of(&self, school: SchoolId) -> Option<usize> {
        self.slots.get(&school).copied()
    }

    /// Returns the school id stored at a slot.
    pub fn school_at(&self, slot: usize) -> SchoolId {
        self.ids[slot]
    }

    fn index(&self, slot: usize, round: usize) -> usize {
        debug_assert!((1..=self.round_count).contains(&round));
        slot * self.round_count + (round - 1)
    }

    /// Seats still open at `slot` in `round`.
    pub fn remaining(&self, slot: usize, round: usize) -> u32 {
        self.remaining[self.index(slot, round)]
    }

    /// Seats configured at `slot` in `round` before the run started.
    pub fn original(&self, slot: usize, round: usize) -> u32 {
        self.original[self.index(slot, round)]
    }

    pub fn has_seat(&self, slot: usize, round: usize) -> bool {
        self.remaining(slot, round) > 0
    }

    /// Takes one seat. Returns false, leaving the ledger untouched, if the
    /// pair is already full.
    pub fn try_consume(&mut self, slot: usize, round: usize) -> bool {
        let idx = self.index(slot, round);
        match self.remaining[idx].checked_sub(1) {
            Some(left) => {
                self.remaining[idx] = left;
                true
            }
            None => false,
        }
    }

    fn row(values: &[u32], slot: usize, round_count: usize) -> u64 {
        values[slot * round_count..(slot + 1) * round_count]
            .iter()
            .map(|&v| v as u64)
            .sum()
    }

    /// Total configured seats at a school across all rounds.
    pub fn original_total(&self, slot: usize) -> u64 {
        Self::row(&self.original, slot, self.round_count)
    }

    /// Seats consumed at a school across all rounds.
    pub fn consumed_total(&self, slot: usize) -> u64 {
        self.original_total(slot) - Self::row(&self.remaining, slot, self.round_count)
    }

    /// Total configured seats across all schools in one round.
    pub fn round_capacity(&self, round: usize) -> u64 {
        (0..self.ids.len())
            .map(|slot| self.original(slot, round) as u64)
            .sum()
    }
}
