//! Attach accessibility verdicts to candidates.
//!
//! Every candidate in a round is looked up at once, so a round takes as long
//! as its slowest lookup. The round is bounded by the candidate pool sizes in
//! [`SearchConfig`] and joins only once every lookup has succeeded, failed or
//! timed out. Results keep the input order regardless of completion order, so
//! ranking after the join is deterministic.

use std::time::Duration;

use futures_util::{StreamExt, stream};
use log::{debug, warn};

use crate::accessibility::{AccessibilityVerdict, FeatureLookup, LookupError};
use crate::candidate::{AugmentedCandidate, Candidate};
use crate::search::SearchConfig;

/// Runs accessibility lookups for a set of candidates.
#[derive(Debug)]
pub struct Augmenter<'a, L: ?Sized> {
    lookup: &'a L,
    search_radius_m: f64,
    timeout: Duration,
}

impl<'a, L> Augmenter<'a, L>
where
    L: FeatureLookup + ?Sized,
{
    /// Borrow `lookup` with the radius and deadline from `config`.
    #[must_use]
    pub const fn new(lookup: &'a L, config: &SearchConfig) -> Self {
        Self {
            lookup,
            search_radius_m: config.lookup_radius_m,
            timeout: config.lookup_timeout,
        }
    }

    /// Look up one candidate.
    ///
    /// Failures and timeouts degrade to [`AccessibilityVerdict::no_access`];
    /// nothing is retried.
    pub async fn augment(&self, candidate: Candidate) -> AugmentedCandidate {
        let location = candidate.location;
        let outcome = tokio::time::timeout(
            self.timeout,
            self.lookup.query(location, self.search_radius_m),
        )
        .await
        .unwrap_or(Err(LookupError::Timeout {
            timeout: self.timeout,
        }));

        let verdict = outcome.map_or_else(
            |err| {
                warn!(
                    "accessibility lookup for ({}, {}) failed, assuming no access: {err}",
                    location.y, location.x
                );
                AccessibilityVerdict::no_access()
            },
            |features| AccessibilityVerdict::from_features(location, &features),
        );
        AugmentedCandidate::new(candidate, verdict)
    }

    /// Look up every candidate concurrently and join on all of them.
    pub async fn augment_all(&self, candidates: Vec<Candidate>) -> Vec<AugmentedCandidate> {
        let count = candidates.len();
        let augmented: Vec<AugmentedCandidate> = stream::iter(candidates)
            .map(|candidate| self.augment(candidate))
            .buffered(count.max(1))
            .collect()
            .await;
        debug!(
            "augmented {count} candidates, {} with road access",
            augmented.iter().filter(|c| c.has_road_access()).count()
        );
        augmented
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::CellIndex;
    use crate::sky::BortleClass;
    use crate::test_support::{StubFeatureLookup, StubResponse};
    use crate::FeatureKind;
    use geo::Coord;
    use rstest::rstest;
    use tokio::time::Instant;

    fn candidate(col: u16) -> Candidate {
        Candidate {
            location: Coord {
                x: f64::from(col).mul_add(0.1, 11.0),
                y: 48.0,
            },
            brightness: BortleClass::new(3).expect("valid class"),
            distance_km: f64::from(col),
            cell: CellIndex {
                row: 0,
                col: usize::from(col),
            },
        }
    }

    fn config() -> SearchConfig {
        SearchConfig::default().with_lookup_timeout(Duration::from_secs(3))
    }

    #[rstest]
    #[tokio::test]
    async fn successful_lookup_attaches_verdict() {
        let lookup = StubFeatureLookup::parking_everywhere();
        let config = config();
        let augmented = Augmenter::new(&lookup, &config).augment(candidate(0)).await;
        assert!(augmented.has_road_access());
        let nearest = augmented.verdict.nearest_feature.expect("nearest feature");
        assert_eq!(nearest.kind, FeatureKind::Parking);
        assert!(nearest.distance_m.abs() < 1e-6);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_lookup_degrades_to_no_access() {
        let lookup = StubFeatureLookup::new(StubResponse::Error(LookupError::Network {
            url: "http://overpass.test".into(),
            message: "connection refused".into(),
        }));
        let config = config();
        let augmented = Augmenter::new(&lookup, &config).augment(candidate(0)).await;
        assert_eq!(augmented.verdict, AccessibilityVerdict::no_access());
        assert_eq!(augmented.candidate, candidate(0));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn timed_out_lookup_degrades_to_no_access() {
        let lookup = StubFeatureLookup::new(StubResponse::Delayed(
            Duration::from_secs(60),
            Box::new(StubResponse::Nearby(FeatureKind::Road)),
        ));
        let config = config();
        let started = Instant::now();
        let augmented = Augmenter::new(&lookup, &config).augment(candidate(0)).await;
        assert!(!augmented.has_road_access());
        assert!(started.elapsed() < Duration::from_secs(60));
    }

    #[rstest]
    #[case(8)]
    #[case(25)]
    #[tokio::test(start_paused = true)]
    async fn whole_round_takes_one_lookup(#[case] size: u16) {
        let lookup = StubFeatureLookup::new(StubResponse::Delayed(
            Duration::from_secs(1),
            Box::new(StubResponse::Nearby(FeatureKind::Road)),
        ));
        let config = config();
        let candidates: Vec<Candidate> = (0..size).map(candidate).collect();

        let started = Instant::now();
        let augmented = Augmenter::new(&lookup, &config)
            .augment_all(candidates)
            .await;

        assert_eq!(augmented.len(), usize::from(size));
        assert_eq!(lookup.call_count(), usize::from(size));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn results_keep_input_order_when_completions_are_shuffled() {
        // The first candidate answers last.
        let lookup = StubFeatureLookup::parking_everywhere().with_response_at(
            candidate(0).location,
            StubResponse::Delayed(Duration::from_secs(2), Box::new(StubResponse::NoFeatures)),
        );
        let config = config();
        let candidates: Vec<Candidate> = (0..4).map(candidate).collect();

        let augmented = Augmenter::new(&lookup, &config)
            .augment_all(candidates)
            .await;

        let cols: Vec<usize> = augmented.iter().map(|a| a.candidate.cell.col).collect();
        assert_eq!(cols, vec![0, 1, 2, 3]);
        let (first, rest) = augmented.split_first().expect("four results");
        assert!(!first.has_road_access());
        assert!(rest.iter().all(AugmentedCandidate::has_road_access));
    }

    #[rstest]
    #[tokio::test]
    async fn empty_round_makes_no_calls() {
        let lookup = StubFeatureLookup::parking_everywhere();
        let config = config();
        let augmented = Augmenter::new(&lookup, &config).augment_all(Vec::new()).await;
        assert!(augmented.is_empty());
        assert_eq!(lookup.call_count(), 0);
    }
}
