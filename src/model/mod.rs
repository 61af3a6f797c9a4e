//! Input entities for an allocation run.
//!
//! Students, schools and preferences are supplied as one read-only
//! snapshot ([`AllocationInput`]). Identifiers are opaque keys owned by
//! whatever storage produced the snapshot; the engine never invents them.

mod input;
mod types;

pub use input::AllocationInput;
pub use types::{Preference, School, SchoolId, Student, StudentId};
