//! Bid builder and priority sorter.

use super::types::{Bid, BidStrategy, TieBreakSource};
use crate::model::{AllocationInput, StudentId};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Expands positive preferences into bids, in draw order.
///
/// Keys are drawn students-major, schools-minor, both in input order,
/// one draw per bid. Zero-point and absent preferences draw nothing.
pub fn build_bids<S>(input: &AllocationInput, source: &mut S) -> Vec<Bid>
where
    S: TieBreakSource + ?Sized,
{
    let points = input.points_by_pair();
    let mut bids = Vec::with_capacity(points.len());

    for student in &input.students {
        for school in &input.schools {
            let p = points.get(&(student.id, school.id)).copied().unwrap_or(0);
            if p == 0 {
                continue;
            }
            bids.push(Bid {
                student_id: student.id,
                school_id: school.id,
                points: p,
                key: source.next_key(),
            });
        }
    }

    bids
}

/// Ranking: points descending, then key ascending.
pub fn priority_order(a: &Bid, b: &Bid) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| a.key.total_cmp(&b.key))
}

/// Sorts bids into processing order.
pub fn sort_bids(bids: &mut [Bid]) {
    bids.sort_by(priority_order);
}

/// Keeps each student's first `k` bids from an already ranked list.
pub fn select_top_k(ranked: Vec<Bid>, k: usize) -> Vec<Bid> {
    let mut taken: HashMap<StudentId, usize> = HashMap::new();
    ranked
        .into_iter()
        .filter(|bid| {
            let count = taken.entry(bid.student_id).or_insert(0);
            if *count < k {
                *count += 1;
                true
            } else {
                false
            }
        })
        .collect()
}

/// Builds, ranks and filters bids for a strategy.
pub fn ranked_bids<S>(input: &AllocationInput, strategy: BidStrategy, source: &mut S) -> Vec<Bid>
where
    S: TieBreakSource + ?Sized,
{
    let mut bids = build_bids(input, source);
    sort_bids(&mut bids);

    match strategy {
        BidStrategy::Exhaustive => bids,
        BidStrategy::TopK { k } => select_top_k(bids, k),
    }
}
