//! Analysis Parameters
//!
//! Cutoffs and factors used by the severity classifier, the statistical
//! reporter, the pattern detector and the forecaster.

use crate::analysis::SeverityLevel;

// ===== THRESHOLDS =====

/// Default alert threshold in Watts.
///
/// Readings strictly above this value are reported as alerts.
pub const DEFAULT_ALERT_THRESHOLD_W: f64 = 450.0;

// ===== SEVERITY =====

/// Severity tiers as (level, minimum excess ratio over the threshold).
///
/// Declaration order is not significant: the classifier sorts tiers by
/// descending cutoff before matching.
pub const SEVERITY_TIERS: [(SeverityLevel, f64); 4] = [
    (SeverityLevel::Low, 0.0),
    (SeverityLevel::Moderate, 0.2),
    (SeverityLevel::High, 0.5),
    (SeverityLevel::Critical, 0.8),
];

// ===== TREND =====

/// Last-third mean above `first * TREND_RISE_FACTOR` reads as increasing.
pub const TREND_RISE_FACTOR: f64 = 1.1;

/// Last-third mean below `first * TREND_FALL_FACTOR` reads as decreasing.
pub const TREND_FALL_FACTOR: f64 = 0.9;

/// Minimum history length before trend fields are reported.
pub const TREND_MIN_POINTS: usize = 3;

// ===== PATTERNS =====

/// Default moving-average window for pattern detection.
pub const DEFAULT_PATTERN_WINDOW: usize = 5;

/// Share of moving-average comparisons that must agree for a consistent trend.
pub const CONSISTENT_TREND_RATIO: f64 = 0.7;

/// Share of eligible triples that must reverse direction to flag a cycle.
pub const CYCLIC_REVERSAL_RATIO: f64 = 0.4;

/// A raw point at least this many times both neighbors is a spike.
pub const SPIKE_FACTOR: f64 = 1.5;

// ===== FORECAST =====

/// Number of trailing values the weighted forecast looks at.
pub const FORECAST_WINDOW: usize = 5;

/// Weights for the trailing window, oldest first. Sums to 1.0.
pub const FORECAST_WEIGHTS: [f64; FORECAST_WINDOW] = [0.1, 0.15, 0.2, 0.25, 0.3];

/// Default number of forecast steps.
pub const DEFAULT_FORECAST_PERIODS: usize = 3;

/// Largest accepted forecast horizon (one week of hourly steps).
pub const MAX_FORECAST_PERIODS: usize = 168;
