//! Severity classification of threshold excursions
//!
//! A reading above the alert threshold is graded by how far it overshoots,
//! measured as a ratio of the threshold itself:
//!
//! ```text
//! excess = (value - threshold) / threshold
//!
//!   0.0 ─────── 0.2 ─────── 0.5 ─────── 0.8 ──────▶
//!   │    low    │ moderate  │   high    │ critical
//! ```
//!
//! The highest tier whose cutoff the excess meets wins. Tiers are sorted by
//! descending cutoff when the classifier is built, so the order they are
//! declared in never affects the result.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::round2;
use crate::constants::analysis::SEVERITY_TIERS;

/// Severity tier of an alert, ordered from mildest to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    /// Less than 20% above the threshold
    Low,
    /// 20% to under 50% above
    Moderate,
    /// 50% to under 80% above
    High,
    /// 80% or more above
    Critical,
}

impl SeverityLevel {
    /// Lowercase tier name
    pub const fn name(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "low",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::High => "high",
            SeverityLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Grade assigned to one value above the threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityGrade {
    /// Matched tier
    pub level: SeverityLevel,
    /// Excess over the threshold as a ratio (0.2 = 20% above)
    pub excess: f64,
}

impl SeverityGrade {
    /// Excess as a percentage rounded to two decimals
    pub fn excess_percentage(&self) -> f64 {
        round2(self.excess * 100.0)
    }
}

/// Severity-tagged alert as reported to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityAlert {
    /// Offending power value, in Watts
    pub value: f64,
    /// Tier of the excess
    pub severity: SeverityLevel,
    /// Excess over the threshold, in percent
    pub excess_percentage: f64,
}

/// Maps excess over a threshold to a severity tier
#[derive(Debug, Clone)]
pub struct SeverityClassifier {
    /// Tiers sorted by cutoff, highest first
    tiers: Vec<(SeverityLevel, f64)>,
}

impl Default for SeverityClassifier {
    fn default() -> Self {
        Self::with_tiers(&SEVERITY_TIERS)
    }
}

impl SeverityClassifier {
    /// Classifier with the standard tiers
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a classifier from (level, cutoff) pairs in any order.
    pub fn with_tiers(tiers: &[(SeverityLevel, f64)]) -> Self {
        let mut tiers = tiers.to_vec();
        tiers.sort_by(|a, b| b.1.total_cmp(&a.1));
        Self { tiers }
    }

    /// Grade `value` against `threshold`.
    ///
    /// Returns `None` for values at or below the threshold. Requires
    /// `threshold > 0`; the analysis engine enforces this at construction.
    pub fn classify(&self, value: f64, threshold: f64) -> Option<SeverityGrade> {
        if value.is_nan() || value <= threshold {
            return None;
        }

        let excess = (value - threshold) / threshold;
        self.tiers
            .iter()
            .find(|(_, cutoff)| excess >= *cutoff)
            .map(|&(level, _)| SeverityGrade { level, excess })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grades_by_highest_matching_tier() {
        let classifier = SeverityClassifier::new();

        assert_eq!(classifier.classify(550.0, 500.0).map(|g| g.level), Some(SeverityLevel::Low));
        assert_eq!(classifier.classify(600.0, 500.0).map(|g| g.level), Some(SeverityLevel::Moderate));
        assert_eq!(classifier.classify(750.0, 500.0).map(|g| g.level), Some(SeverityLevel::High));
        assert_eq!(classifier.classify(900.0, 500.0).map(|g| g.level), Some(SeverityLevel::Critical));
        assert_eq!(classifier.classify(1000.0, 500.0).map(|g| g.level), Some(SeverityLevel::Critical));
    }

    #[test]
    fn values_at_or_below_threshold_are_not_graded() {
        let classifier = SeverityClassifier::new();

        assert!(classifier.classify(500.0, 500.0).is_none());
        assert!(classifier.classify(10.0, 500.0).is_none());
        assert!(classifier.classify(f64::NAN, 500.0).is_none());
    }

    #[test]
    fn declaration_order_does_not_matter() {
        // Ascending declaration would pick `low` for everything if matched in order
        let ascending = SeverityClassifier::with_tiers(&[
            (SeverityLevel::Low, 0.0),
            (SeverityLevel::Moderate, 0.2),
            (SeverityLevel::High, 0.5),
            (SeverityLevel::Critical, 0.8),
        ]);
        let shuffled = SeverityClassifier::with_tiers(&[
            (SeverityLevel::High, 0.5),
            (SeverityLevel::Low, 0.0),
            (SeverityLevel::Critical, 0.8),
            (SeverityLevel::Moderate, 0.2),
        ]);

        for value in [510.0, 600.0, 760.0, 950.0] {
            assert_eq!(ascending.classify(value, 500.0), shuffled.classify(value, 500.0));
        }
        assert_eq!(ascending.classify(950.0, 500.0).map(|g| g.level), Some(SeverityLevel::Critical));
    }

    #[test]
    fn excess_percentage_is_rounded() {
        let grade = SeverityClassifier::new().classify(700.0, 450.0).unwrap();
        assert_eq!(grade.excess_percentage(), 55.56);
        assert_eq!(grade.level, SeverityLevel::High);
    }

    #[test]
    fn levels_are_ordered() {
        assert!(SeverityLevel::Critical > SeverityLevel::High);
        assert!(SeverityLevel::Moderate > SeverityLevel::Low);
        assert_eq!(SeverityLevel::Moderate.to_string(), "moderate");
    }
}
