//! Mutable run state shared by the greedy and gap-filling passes.

use crate::ledger::CapacityLedger;
use crate::model::{SchoolId, StudentId};
use crate::result::{Assignment, Origin};
use std::collections::HashMap;

/// Set of filled round numbers for one student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundSet(u64);

impl RoundSet {
    pub fn contains(&self, round: usize) -> bool {
        self.0 & Self::bit(round) != 0
    }

    pub fn insert(&mut self, round: usize) {
        self.0 |= Self::bit(round);
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Rounds in `1..=round_count` not yet filled, ascending.
    pub fn missing(&self, round_count: usize) -> impl Iterator<Item = usize> + '_ {
        (1..=round_count).filter(move |&r| !self.contains(r))
    }

    fn bit(round: usize) -> u64 {
        debug_assert!((1..=64).contains(&round));
        1u64 << (round - 1)
    }
}

/// Ledger, per-student round sets and the growing assignment batch.
#[derive(Debug)]
pub(crate) struct RunState {
    pub ledger: CapacityLedger,
    pub filled: HashMap<StudentId, RoundSet>,
    pub assignments: Vec<Assignment>,
}

impl RunState {
    pub fn new(ledger: CapacityLedger) -> Self {
        Self {
            ledger,
            filled: HashMap::new(),
            assignments: Vec::new(),
        }
    }

    pub fn rounds_of(&self, student: StudentId) -> RoundSet {
        self.filled.get(&student).copied().unwrap_or_default()
    }

    /// Consumes a seat and records the assignment.
    ///
    /// Returns false without side effects if the seat is already taken.
    pub fn commit(
        &mut self,
        student: StudentId,
        slot: usize,
        round: usize,
        origin: Origin,
        preference_score: u32,
    ) -> bool {
        if !self.ledger.try_consume(slot, round) {
            return false;
        }
        self.filled.entry(student).or_default().insert(round);
        let school_id: SchoolId = self.ledger.school_at(slot);
        self.assignments.push(Assignment {
            student_id: student,
            school_id,
            round,
            origin,
            preference_score,
        });
        true
    }
}
