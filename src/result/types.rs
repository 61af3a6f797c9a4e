//! Assignment batch types.

use super::stats::RunStatistics;
use crate::model::{SchoolId, StudentId};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an assignment was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Origin {
    /// Committed from a bid during the greedy pass.
    Preferred,

    /// Forced by the gap-filling pass at zero preference weight.
    Fallback,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preferred => "preferred",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One student placed at one school for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    pub student_id: StudentId,
    pub school_id: SchoolId,

    /// Round number, starting at 1.
    pub round: usize,
    pub origin: Origin,

    /// Points of the bid that produced this assignment; 0 for fallback.
    pub preference_score: u32,
}

/// A (student, round) pair that no school could serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShortfallWarning {
    pub student_id: StudentId,
    pub round: usize,
}

impl fmt::Display for ShortfallWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no capacity left for student {} in round {}",
            self.student_id, self.round
        )
    }
}

/// The complete output of one allocation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AllocationResult {
    /// Assignments in commit order: greedy pass first, then fallbacks.
    pub assignments: Vec<Assignment>,
    pub statistics: RunStatistics,

    /// One entry per unfillable (student, round); empty on a full match.
    pub warnings: Vec<ShortfallWarning>,

    /// Seed that produced the tie-break keys, if they came from a seeded
    /// generator. Re-running with this seed reproduces the batch.
    pub seed: Option<u64>,
}

impl AllocationResult {
    /// Returns true if every student holds every round.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty() && self.statistics.short_students == 0
    }

    /// Returns a student's assignments ordered by round.
    pub fn assignments_for(&self, student: StudentId) -> Vec<Assignment> {
        let mut found: Vec<Assignment> = self
            .assignments
            .iter()
            .filter(|a| a.student_id == student)
            .copied()
            .collect();
        found.sort_by_key(|a| a.round);
        found
    }

    /// Returns the rounds a student could not be placed in.
    pub fn unfilled_rounds(&self, student: StudentId) -> Vec<usize> {
        self.warnings
            .iter()
            .filter(|w| w.student_id == student)
            .map(|w| w.round)
            .collect()
    }
}
