//! Greedy pass: one sweep over the ranked bid stream.

use super::types::RunState;
use crate::bidding::Bid;
use crate::result::Origin;

/// Commits each bid to the earliest round that is open both for the
/// student and at the school. A bid yields at most one assignment.
///
/// Bids from students who already hold every round, and bids whose school
/// has no usable round left, are dropped. Returns the number of bids that
/// produced an assignment.
pub(crate) fn allocate_bids(state: &mut RunState, bids: &[Bid]) -> usize {
    let round_count = state.ledger.round_count();
    let mut committed = 0usize;

    for bid in bids {
        let rounds = state.rounds_of(bid.student_id);
        if rounds.len() >= round_count {
            continue;
        }
        let Some(slot) = state.ledger.slot_of(bid.school_id) else {
            continue;
        };

        let open = rounds
            .missing(round_count)
            .find(|&round| state.ledger.has_seat(slot, round));

        if let Some(round) = open {
            if state.commit(bid.student_id, slot, round, Origin::Preferred, bid.points) {
                committed += 1;
            }
        }
    }

    tracing::debug!(bids = bids.len(), committed, "greedy pass finished");
    committed
}
