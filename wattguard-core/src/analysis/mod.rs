//! Power Consumption Analysis
//!
//! ## Overview
//!
//! The analysis layer turns a power series into everything the dashboard
//! shows about it:
//!
//! ```text
//! history ──┬─▶ severity   alerts above threshold, graded low..critical
//!           ├─▶ report     average/min/max/median/std-dev, trend, peak hour
//!           ├─▶ patterns   smoothed trend, oscillation, raw spikes
//!           └─▶ forecast   recency-weighted autoregressive projection
//! ```
//!
//! [`AnalysisEngine`] is the facade. It holds a single alert threshold fixed
//! at construction and is otherwise stateless: every operation is a pure
//! function of the series passed in, so callers snapshot the
//! [`HistoryStore`](crate::HistoryStore) and hand the extracted series over.
//!
//! ## Insufficient Data
//!
//! Analyses that need a minimum amount of history return
//! [`AnalysisOutcome::Insufficient`] with a human-readable status instead of
//! numbers. It serializes as `{"status": "..."}`, a ready result serializes
//! as the result itself.
//!
//! ```rust
//! use wattguard_core::AnalysisEngine;
//!
//! let engine = AnalysisEngine::new(450.0).unwrap();
//! let history = [100.0, 200.0, 500.0];
//!
//! assert_eq!(engine.analyze(&history), vec![500.0]);
//! assert_eq!(
//!     engine.generate_trend_report(&history),
//!     "Trend Report: Average power consumption = 266.67 Watts"
//! );
//! assert!(!engine.detect_patterns(&history, 5).is_ready());
//! ```

use serde::Serialize;

pub mod engine;
pub mod forecast;
pub mod patterns;
pub mod report;
pub mod severity;

pub use engine::AnalysisEngine;
pub use forecast::forecast;
pub use patterns::{detect_patterns, PatternSummary, TrendPattern};
pub use report::{build_report, PowerReport, TrendDirection};
pub use severity::{SeverityAlert, SeverityClassifier, SeverityGrade, SeverityLevel};

/// Status reported when there is nothing to summarize.
pub const NO_DATA_STATUS: &str = "No data to generate report.";

/// Status reported when the series is too short for pattern detection.
pub const INSUFFICIENT_PATTERN_STATUS: &str = "Insufficient data for pattern detection";

/// Result of an analysis that needs a minimum amount of history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome<T> {
    /// Too little data; no numeric fields are available
    Insufficient {
        /// Human-readable reason
        status: String,
    },
    /// Analysis completed
    Ready(T),
}

impl<T> AnalysisOutcome<T> {
    /// Outcome carrying only a status message
    pub fn insufficient(status: impl Into<String>) -> Self {
        Self::Insufficient { status: status.into() }
    }

    /// `true` when the analysis produced a result
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The result, if the analysis completed
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Insufficient { .. } => None,
        }
    }

    /// The result, if the analysis completed
    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Insufficient { .. } => None,
        }
    }

    /// The insufficient-data status, if any
    pub fn status(&self) -> Option<&str> {
        match self {
            Self::Insufficient { status } => Some(status.as_str()),
            Self::Ready(_) => None,
        }
    }
}

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    libm::round(value * 100.0) / 100.0
}

/// Arithmetic mean; `None` for an empty slice.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round2(266.666_666), 266.67);
        assert_eq!(round2(-1.234), -1.23);
        assert_eq!(round2(20.0), 20.0);
    }

    #[test]
    fn insufficient_serializes_as_status() {
        let outcome: AnalysisOutcome<u32> = AnalysisOutcome::insufficient(NO_DATA_STATUS);
        let json = serde_json::to_string(&outcome).unwrap();

        assert_eq!(json, r#"{"status":"No data to generate report."}"#);
        assert_eq!(outcome.status(), Some(NO_DATA_STATUS));
        assert!(outcome.ready().is_none());
    }
}
