//! Post-run report: students who missed all of their top choices.

use crate::model::{AllocationInput, SchoolId, StudentId};
use crate::result::AllocationResult;
use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A student none of whose assignments is at one of their top schools.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MissedTopChoices {
    pub student_id: StudentId,

    /// Highest-point schools, best first (ties by ascending id).
    pub top_schools: Vec<SchoolId>,

    /// Schools the student was placed at, in round order.
    pub assigned_schools: Vec<SchoolId>,
}

/// Lists students who received none of their `n` highest-point schools.
///
/// Students without any positive preference have no top choices and are
/// never listed.
pub fn missed_top_choices(
    input: &AllocationInput,
    result: &AllocationResult,
    n: usize,
) -> Vec<MissedTopChoices> {
    let mut ranked: HashMap<StudentId, Vec<(u32, SchoolId)>> = HashMap::new();
    for pref in input.preferences.iter().filter(|p| p.points > 0) {
        ranked
            .entry(pref.student_id)
            .or_default()
            .push((pref.points, pref.school_id));
    }

    let mut missed = Vec::new();
    for student in &input.students {
        let Some(prefs) = ranked.get_mut(&student.id) else {
            continue;
        };
        prefs.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        let top_schools: Vec<SchoolId> = prefs.iter().take(n).map(|&(_, id)| id).collect();
        let top: HashSet<SchoolId> = top_schools.iter().copied().collect();

        let assigned_schools: Vec<SchoolId> = result
            .assignments_for(student.id)
            .iter()
            .map(|a| a.school_id)
            .collect();

        if !assigned_schools.iter().any(|s| top.contains(s)) {
            missed.push(MissedTopChoices {
                student_id: student.id,
                top_schools,
                assigned_schools,
            });
        }
    }

    missed
}
