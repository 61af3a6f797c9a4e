//! Error types for allocation runs.

use crate::model::{SchoolId, StudentId};
use thiserror::Error;

/// Errors that reject a run before any capacity is consumed.
///
/// Running out of seats is not an error: it is reported through
/// [`ShortfallWarning`](crate::result::ShortfallWarning) entries on an
/// otherwise successful result.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// The configuration is inconsistent.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The same student id appears twice in the roster.
    #[error("duplicate student id {0}")]
    DuplicateStudent(StudentId),

    /// The same school id appears twice in the roster.
    #[error("duplicate school id {0}")]
    DuplicateSchool(SchoolId),

    /// A school does not list exactly one capacity per round.
    #[error("school {school} has {actual} round capacities, expected {expected}")]
    CapacityShape {
        school: SchoolId,
        expected: usize,
        actual: usize,
    },

    /// A preference names a student that is not in the roster.
    #[error("preference references unknown student {0}")]
    UnknownStudent(StudentId),

    /// A preference names a school that is not in the roster.
    #[error("preference references unknown school {0}")]
    UnknownSchool(SchoolId),

    /// More than one preference exists for the same pair.
    #[error("duplicate preference for student {student} at school {school}")]
    DuplicatePreference { student: StudentId, school: SchoolId },

    /// The storage collaborator failed to load input or apply results.
    #[error("store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AllocationError {
    /// Returns true if the error comes from the input roster rather than
    /// the configuration or the store.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::InvalidConfig(_) | Self::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = AllocationError::CapacityShape {
            school: SchoolId(3),
            expected: 6,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "school 3 has 4 round capacities, expected 6"
        );

        let err = AllocationError::DuplicatePreference {
            student: StudentId(1),
            school: SchoolId(2),
        };
        assert_eq!(
            err.to_string(),
            "duplicate preference for student 1 at school 2"
        );
    }

    #[test]
    fn test_input_error_classification() {
        assert!(AllocationError::UnknownSchool(SchoolId(9)).is_input_error());
        assert!(!AllocationError::InvalidConfig("x".into()).is_input_error());
    }
}
