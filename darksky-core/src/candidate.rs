//! Transient records flowing through a search.
//!
//! Candidates are created by the scanner, ordered by the ranker and enriched
//! by the augmenter. Each stage produces new values; none is mutated in place.

use geo::Coord;

use crate::accessibility::AccessibilityVerdict;
use crate::raster::CellIndex;
use crate::sky::BortleClass;

/// A covered raster cell within the requested annulus.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Centre of the raster cell (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
    /// Brightness class of the cell.
    pub brightness: BortleClass,
    /// Great-circle distance from the search origin.
    pub distance_km: f64,
    /// Grid position; used as the final, deterministic tie-break.
    pub cell: CellIndex,
}

/// A candidate with its road-accessibility verdict attached.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedCandidate {
    /// The scanned candidate.
    pub candidate: Candidate,
    /// Outcome of the accessibility lookup.
    pub verdict: AccessibilityVerdict,
}

impl AugmentedCandidate {
    /// Pair a candidate with its verdict.
    #[must_use]
    pub const fn new(candidate: Candidate, verdict: AccessibilityVerdict) -> Self {
        Self { candidate, verdict }
    }

    /// Whether the lookup reported road access.
    #[must_use]
    pub const fn has_road_access(&self) -> bool {
        self.verdict.has_road_access
    }
}
