//! Order candidates darkest first, then nearest.

use std::cmp::Ordering;

use crate::candidate::Candidate;

/// Total order used everywhere candidates are ranked.
///
/// Darker brightness class first, then shorter distance, then row-major grid
/// position so equal keys still order reproducibly.
#[must_use]
pub fn darkest_then_nearest(a: &Candidate, b: &Candidate) -> Ordering {
    a.brightness
        .cmp(&b.brightness)
        .then_with(|| a.distance_km.total_cmp(&b.distance_km))
        .then_with(|| a.cell.cmp(&b.cell))
}

/// Sort candidates with [`darkest_then_nearest`].
#[must_use]
pub fn rank(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(darkest_then_nearest);
    candidates
}

/// Rank candidates and keep the best `n`.
#[must_use]
pub fn rank_and_take(candidates: Vec<Candidate>, n: usize) -> Vec<Candidate> {
    let mut ranked = rank(candidates);
    ranked.truncate(n);
    ranked
}
