//! Aggregate statistics over a finished run.

use super::types::{Assignment, Origin};
use crate::ledger::CapacityLedger;
use crate::model::{SchoolId, Student, StudentId};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Seats used at one school.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SchoolFill {
    pub school_id: SchoolId,
    pub assigned: u64,

    /// Configured seats summed over all rounds.
    pub capacity: u64,

    /// `assigned / capacity`, or 0 when the school offers no seats.
    pub fill_rate: f64,
}

/// Seats used in one round across all schools.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoundFill {
    pub round: usize,
    pub assigned: u64,
    pub capacity: u64,
    pub average_preference_score: f64,
}

/// Match quality summary.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunStatistics {
    pub total_students: usize,

    /// Students with at least one assignment.
    pub matched_students: usize,
    pub unmatched_students: usize,

    /// Students holding every round.
    pub complete_students: usize,

    /// Students missing at least one round.
    pub short_students: usize,

    pub preferred_assignments: usize,
    pub fallback_assignments: usize,

    /// Mean preference score over all assignments; 0 when there are none.
    pub average_preference_score: f64,
    pub school_fill: Vec<SchoolFill>,
    pub round_fill: Vec<RoundFill>,
}

impl RunStatistics {
    /// Summarizes an assignment batch against the ledger it was drawn from.
    ///
    /// Capacities come from the ledger's original configuration, so the
    /// result does not depend on how many seats were consumed.
    pub fn compute(
        students: &[Student],
        ledger: &CapacityLedger,
        assignments: &[Assignment],
    ) -> Self {
        let round_count = ledger.round_count();

        let mut per_student: HashMap<StudentId, usize> = HashMap::new();
        let mut per_school: HashMap<SchoolId, u64> = HashMap::new();
        let mut per_round = vec![(0u64, 0u64); round_count];
        let mut score_sum = 0u64;
        let mut preferred = 0usize;

        for a in assignments {
            *per_student.entry(a.student_id).or_insert(0) += 1;
            *per_school.entry(a.school_id).or_insert(0) += 1;
            if let Some(slot) = a.round.checked_sub(1).and_then(|r| per_round.get_mut(r)) {
                slot.0 += 1;
                slot.1 += a.preference_score as u64;
            }
            score_sum += a.preference_score as u64;
            if a.origin == Origin::Preferred {
                preferred += 1;
            }
        }

        let total_students = students.len();
        let matched_students = students
            .iter()
            .filter(|s| per_student.contains_key(&s.id))
            .count();
        let complete_students = students
            .iter()
            .filter(|s| per_student.get(&s.id).copied().unwrap_or(0) >= round_count)
            .count();

        let school_fill = (0..ledger.school_count())
            .map(|slot| {
                let school_id = ledger.school_at(slot);
                let assigned = per_school.get(&school_id).copied().unwrap_or(0);
                let capacity = ledger.original_total(slot);
                SchoolFill {
                    school_id,
                    assigned,
                    capacity,
                    fill_rate: ratio(assigned, capacity),
                }
            })
            .collect();

        let round_fill = per_round
            .iter()
            .enumerate()
            .map(|(i, &(assigned, scores))| RoundFill {
                round: i + 1,
                assigned,
                capacity: ledger.round_capacity(i + 1),
                average_preference_score: ratio(scores, assigned),
            })
            .collect();

        Self {
            total_students,
            matched_students,
            unmatched_students: total_students - matched_students,
            complete_students,
            short_students: total_students - complete_students,
            preferred_assignments: preferred,
            fallback_assignments: assignments.len() - preferred,
            average_preference_score: ratio(score_sum, assignments.len() as u64),
            school_fill,
            round_fill,
        }
    }

    /// Returns the fill record for a school.
    pub fn fill_for(&self, school: SchoolId) -> Option<&SchoolFill> {
        self.school_fill.iter().find(|f| f.school_id == school)
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
