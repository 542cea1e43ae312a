//! Bortle brightness classes and the user-facing darkness score.
//!
//! A lower Bortle class means a darker sky. The engine converts classes into
//! a `1..=10` score where higher is better, and bands scores into
//! [`SkyQuality`] labels for display.

use std::fmt;

/// Lowest score a spot can receive.
pub const MIN_SCORE: u8 = 1;
/// Highest score a spot can receive.
pub const MAX_SCORE: u8 = 10;

/// Bortle scale class in `1..=9`.
///
/// Ordering follows the scale, so the darkest class sorts first.
///
/// # Examples
///
/// ```
/// use darksky_core::BortleClass;
///
/// let class = BortleClass::new(8).expect("in range");
/// assert_eq!(class.score(), 3);
/// assert!(BortleClass::new(0).is_none());
/// assert!(BortleClass::PRISTINE < class);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct BortleClass(u8);

impl BortleClass {
    /// Class 1: excellent dark-sky site.
    pub const PRISTINE: Self = Self(1);
    /// Class 9: inner-city sky.
    pub const INNER_CITY: Self = Self(9);

    /// Wrap `value` when it lies in `1..=9`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::PRISTINE.0 && value <= Self::INNER_CITY.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Raw class value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Darkness score for this class; see [`brightness_to_score`].
    #[must_use]
    pub fn score(self) -> u8 {
        brightness_to_score(self.0)
    }
}

/// Convert a brightness class into a darkness score in `1..=10`.
///
/// `score = clamp(11 - class, 1, 10)`. Strictly decreasing over the Bortle
/// range, so distinct classes never share a score.
#[must_use]
pub fn brightness_to_score(brightness_class: u8) -> u8 {
    11_u8
        .saturating_sub(brightness_class)
        .clamp(MIN_SCORE, MAX_SCORE)
}

/// Human-readable band for a darkness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SkyQuality {
    /// Score below 4.
    Poor,
    /// Score 4.
    Fair,
    /// Score 5 or 6.
    Good,
    /// Score 7 or 8.
    Excellent,
    /// Score 9 or 10.
    Exceptional,
}

impl SkyQuality {
    /// Band a score. Monotone: a higher score never gets a lower band.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            9.. => Self::Exceptional,
            7 | 8 => Self::Excellent,
            5 | 6 => Self::Good,
            4 => Self::Fair,
            _ => Self::Poor,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
            Self::Exceptional => "Exceptional",
        }
    }
}

impl fmt::Display for SkyQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label for a darkness score.
#[must_use]
pub const fn score_to_label(score: u8) -> SkyQuality {
    SkyQuality::from_score(score)
}
