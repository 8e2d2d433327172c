//! Control Parameters
//!
//! Thresholds and power bands used by the automatic control strategies.

/// Default threshold for rule-based automatic control, in Watts.
pub const DEFAULT_CONTROL_THRESHOLD_W: f64 = 420.0;

/// Upper bound (exclusive) of the `low` load band, in Watts.
pub const LOW_BAND_MAX_W: f64 = 150.0;

/// Upper bound (exclusive) of the `normal` load band, in Watts.
pub const NORMAL_BAND_MAX_W: f64 = 500.0;

/// Upper bound (exclusive) of the `high` load band, in Watts.
///
/// Anything at or above this is `abnormal`.
pub const HIGH_BAND_MAX_W: f64 = 700.0;

/// Building name recorded with log entries when none is configured.
pub const DEFAULT_BUILDING: &str = "Unknown";
