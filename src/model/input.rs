//! The roster snapshot consumed by a run.

use super::types::{Preference, School, SchoolId, Student, StudentId};
use crate::error::AllocationError;
use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Students, schools and preferences for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AllocationInput {
    pub students: Vec<Student>,
    pub schools: Vec<School>,
    pub preferences: Vec<Preference>,
}

impl AllocationInput {
    pub fn new(students: Vec<Student>, schools: Vec<School>, preferences: Vec<Preference>) -> Self {
        Self {
            students,
            schools,
            preferences,
        }
    }

    /// Checks the roster preconditions for a run over `round_count` rounds.
    ///
    /// Fails on the first duplicate id, malformed capacity vector,
    /// dangling preference reference, or repeated (student, school) pair.
    pub fn validate(&self, round_count: usize) -> Result<(), AllocationError> {
        let mut students = HashSet::with_capacity(self.students.len());
        for student in &self.students {
            if !students.insert(student.id) {
                return Err(AllocationError::DuplicateStudent(student.id));
            }
        }

        let mut schools = HashSet::with_capacity(self.schools.len());
        for school in &self.schools {
            if !schools.insert(school.id) {
                return Err(AllocationError::DuplicateSchool(school.id));
            }
            if school.capacities.len() != round_count {
                return Err(AllocationError::CapacityShape {
                    school: school.id,
                    expected: round_count,
                    actual: school.capacities.len(),
                });
            }
        }

        let mut pairs = HashSet::with_capacity(self.preferences.len());
        for pref in &self.preferences {
            if !students.contains(&pref.student_id) {
                return Err(AllocationError::UnknownStudent(pref.student_id));
            }
            if !schools.contains(&pref.school_id) {
                return Err(AllocationError::UnknownSchool(pref.school_id));
            }
            if !pairs.insert((pref.student_id, pref.school_id)) {
                return Err(AllocationError::DuplicatePreference {
                    student: pref.student_id,
                    school: pref.school_id,
                });
            }
        }

        Ok(())
    }

    /// Returns points keyed by (student, school). Assumes a validated roster.
    pub(crate) fn points_by_pair(&self) -> HashMap<(StudentId, SchoolId), u32> {
        self.preferences
            .iter()
            .map(|p| ((p.student_id, p.school_id), p.points))
            .collect()
    }

    /// Returns the points a student placed on a school (0 if absent).
    pub fn points(&self, student: StudentId, school: SchoolId) -> u32 {
        self.preferences
            .iter()
            .find(|p| p.student_id == student && p.school_id == school)
            .map_or(0, |p| p.points)
    }
}
