//! Composite scoring for radius-band searches.
//!
//! Within a band, darkness alone would favour the most remote cell. The
//! composite score trades darkness against how close the nearest road or car
//! park is, using the weights in [`SearchConfig`].

use std::cmp::Ordering;

use crate::accessibility::AccessibilityVerdict;
use crate::candidate::AugmentedCandidate;
use crate::rank::darkest_then_nearest;
use crate::sky::BortleClass;

use super::config::SearchConfig;

/// Accessibility term of the composite score.
///
/// Zero without road access. With access, scales linearly from
/// `accessibility_scale` for a feature at the candidate down to zero at the
/// lookup radius. Access reported without a distance scores the full scale.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "linear falloff over the lookup radius")]
pub fn accessibility_score(verdict: &AccessibilityVerdict, config: &SearchConfig) -> f64 {
    if !verdict.has_road_access {
        return 0.0;
    }
    let scale = config.accessibility_scale;
    verdict.nearest_feature.as_ref().map_or(scale, |feature| {
        let proximity = 1.0 - feature.distance_m / config.lookup_radius_m;
        (scale * proximity).clamp(0.0, scale)
    })
}

/// Weighted sum of darkness and accessibility for one candidate.
///
/// # Examples
///
/// ```
/// use darksky_core::{AccessibilityVerdict, SearchConfig};
/// use darksky_core::search::combined_score;
/// use darksky_core::BortleClass;
///
/// let config = SearchConfig::default();
/// let class = BortleClass::new(2).expect("valid class");
/// let score = combined_score(class, &AccessibilityVerdict::no_access(), &config);
/// assert!((score - 14.0).abs() < 1e-9);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "weighted sum of the two score terms")]
pub fn combined_score(
    brightness: BortleClass,
    verdict: &AccessibilityVerdict,
    config: &SearchConfig,
) -> f64 {
    let darkness = f64::from(BortleClass::INNER_CITY.get().saturating_sub(brightness.get()));
    darkness.mul_add(
        config.darkness_weight,
        accessibility_score(verdict, config) * config.accessibility_weight,
    )
}

/// Pick the candidate with the highest composite score.
///
/// Equal scores fall back to darker class, then shorter distance, then grid
/// position. Returns `None` for an empty pool.
#[must_use]
pub fn select_best(
    pool: Vec<AugmentedCandidate>,
    config: &SearchConfig,
) -> Option<(AugmentedCandidate, f64)> {
    pool.into_iter()
        .map(|augmented| {
            let score = combined_score(augmented.candidate.brightness, &augmented.verdict, config);
            (augmented, score)
        })
        .min_by(|(a, a_score), (b, b_score)| {
            higher_score_first(*a_score, *b_score)
                .then_with(|| darkest_then_nearest(&a.candidate, &b.candidate))
        })
}

/// Compare two composite scores, higher first.
#[must_use]
fn higher_score_first(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
