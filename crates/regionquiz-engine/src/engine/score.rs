use serde::Serialize;

/// Percentage of correctly labeled regions, 0 to 100.
///
/// # Example
///
/// ```
/// use regionquiz_engine::Score;
///
/// assert_eq!(Score::from_counts(2, 3).percent(), 67);
/// assert!(Score::from_counts(4, 4).is_perfect());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    derive_more::Display,
)]
#[serde(transparent)]
#[display("{_0}%")]
pub struct Score(u8);

impl Score {
    pub const PERFECT: Self = Self(100);

    /// Computes `round(100 * correct / total)`, rounding halves up.
    ///
    /// A game without regions scores 0.
    #[must_use]
    pub fn from_counts(correct: usize, total: usize) -> Self {
        if total == 0 {
            return Self(0);
        }
        let correct = correct.min(total);
        let percent = (200 * correct + total) / (2 * total);
        Self(u8::try_from(percent).unwrap_or(100))
    }

    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_perfect(self) -> bool {
        self.0 == Self::PERFECT.0
    }
}

/// Whether a region's assigned label matches its own label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "lowercase")]
pub enum RegionOutcome {
    Correct,
    Incorrect,
}
