//! Roster entity types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque student identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct StudentId(pub u64);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque school identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct SchoolId(pub u64);

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant who must be placed in every round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Student {
    pub id: StudentId,
    pub name: String,
}

impl Student {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: StudentId(id),
            name: name.into(),
        }
    }
}

/// An organization offering seats in each round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct School {
    pub id: SchoolId,
    pub name: String,

    /// Seats offered per round; index 0 is round 1.
    pub capacities: Vec<u32>,
}

impl School {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        capacities: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self {
            id: SchoolId(id),
            name: name.into(),
            capacities: capacities.into_iter().collect(),
        }
    }

    /// Returns the seats offered across all rounds.
    pub fn total_capacity(&self) -> u64 {
        self.capacities.iter().map(|&c| c as u64).sum()
    }
}

/// Points a student placed on a school. Zero points is not a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Preference {
    pub student_id: StudentId,
    pub school_id: SchoolId,
    pub points: u32,
}

impl Preference {
    pub fn new(student: u64, school: u64, points: u32) -> Self {
        Self {
            student_id: StudentId(student),
            school_id: SchoolId(school),
            points,
        }
    }
}
