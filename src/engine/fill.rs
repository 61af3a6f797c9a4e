//! Gap-filling pass for students left short after the greedy pass.

use super::types::RunState;
use crate::model::Student;
use crate::result::{Origin, ShortfallWarning};

/// Places every short student into each missing round at the first school
/// (ascending id) with a free seat, at zero preference weight.
///
/// Rounds with no free seat anywhere are left empty and reported. When
/// `fill` is false nothing is placed and every missing round is reported.
pub(crate) fn fill_gaps(
    state: &mut RunState,
    students: &[Student],
    fill: bool,
) -> Vec<ShortfallWarning> {
    let round_count = state.ledger.round_count();

    let mut by_id: Vec<usize> = (0..state.ledger.school_count()).collect();
    by_id.sort_by_key(|&slot| state.ledger.school_at(slot));

    let mut warnings = Vec::new();
    let mut placed = 0usize;

    for student in students {
        let rounds = state.rounds_of(student.id);
        if rounds.len() >= round_count {
            continue;
        }
        let missing: Vec<usize> = rounds.missing(round_count).collect();

        for round in missing {
            let open = if fill {
                by_id
                    .iter()
                    .copied()
                    .find(|&slot| state.ledger.has_seat(slot, round))
            } else {
                None
            };

            match open {
                Some(slot) if state.commit(student.id, slot, round, Origin::Fallback, 0) => {
                    placed += 1;
                }
                _ => {
                    tracing::warn!(
                        student = %student.id,
                        round,
                        "no capacity available for round"
                    );
                    warnings.push(ShortfallWarning {
                        student_id: student.id,
                        round,
                    });
                }
            }
        }
    }

    tracing::debug!(placed, shortfalls = warnings.len(), "gap fill finished");
    warnings
}
