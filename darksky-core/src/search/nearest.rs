//! Final selection for nearest-N searches.

use log::debug;

use crate::candidate::AugmentedCandidate;
use crate::rank::darkest_then_nearest;

/// Choose up to `desired` spots from an augmented pool.
///
/// When at least `minimum_accessible` (never less than one) candidates have
/// road access, only those are kept. Otherwise the whole pool is used, so a
/// region with no known access still returns its darkest spots, each flagged
/// as inaccessible. The survivors are ordered darkest first, then nearest.
#[must_use]
pub fn select_nearest(
    pool: Vec<AugmentedCandidate>,
    desired: usize,
    minimum_accessible: usize,
) -> Vec<AugmentedCandidate> {
    let threshold = minimum_accessible.max(1);
    let accessible = pool.iter().filter(|c| c.has_road_access()).count();

    let mut selected: Vec<AugmentedCandidate> = if accessible >= threshold {
        pool.into_iter().filter(AugmentedCandidate::has_road_access).collect()
    } else {
        debug!(
            "only {accessible} of {} candidates have road access (need {threshold}), \
             returning remote spots",
            pool.len()
        );
        pool
    };

    selected.sort_by(|a, b| darkest_then_nearest(&a.candidate, &b.candidate));
    selected.truncate(desired);
    selected
}
