//! Analysis engine facade

use super::{
    build_report, detect_patterns, forecast, mean, AnalysisOutcome, PatternSummary, PowerReport,
    SeverityAlert, SeverityClassifier, NO_DATA_STATUS,
};
use crate::errors::{MonitorError, MonitorResult};

/// Analysis facade keyed by a fixed alert threshold
///
/// One engine is one threshold policy. It never reads the history store
/// itself; every operation takes the series to analyze.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    threshold: f64,
    severity: SeverityClassifier,
}

impl AnalysisEngine {
    /// Create an engine alerting above `threshold` Watts.
    ///
    /// Fails with [`MonitorError::InvalidThreshold`] unless the threshold is
    /// finite and strictly positive.
    pub fn new(threshold: f64) -> MonitorResult<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(MonitorError::InvalidThreshold { value: threshold });
        }

        Ok(Self {
            threshold,
            severity: SeverityClassifier::new(),
        })
    }

    /// Alert threshold in Watts
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Values strictly above the threshold, in their original order.
    pub fn analyze(&self, history: &[f64]) -> Vec<f64> {
        history.iter().copied().filter(|&v| v > self.threshold).collect()
    }

    /// Values strictly above the threshold with their severity grade.
    pub fn analyze_with_severity(&self, history: &[f64]) -> Vec<SeverityAlert> {
        history
            .iter()
            .filter_map(|&value| {
                self.severity.classify(value, self.threshold).map(|grade| SeverityAlert {
                    value,
                    severity: grade.level,
                    excess_percentage: grade.excess_percentage(),
                })
            })
            .collect()
    }

    /// One-line average summary.
    pub fn generate_trend_report(&self, history: &[f64]) -> String {
        match mean(history) {
            Some(average) => format!("Trend Report: Average power consumption = {average:.2} Watts"),
            None => NO_DATA_STATUS.to_string(),
        }
    }

    /// Full statistical report, with peak-hour attribution when timestamps
    /// line up with the series.
    pub fn generate_detailed_report<S: AsRef<str>>(
        &self,
        history: &[f64],
        timestamps: Option<&[S]>,
    ) -> AnalysisOutcome<PowerReport> {
        build_report(history, timestamps, self.threshold)
    }

    /// Trend, oscillation and spike patterns over `window_size`-point averages.
    pub fn detect_patterns(&self, history: &[f64], window_size: usize) -> AnalysisOutcome<PatternSummary> {
        detect_patterns(history, window_size)
    }

    /// Project `periods_ahead` future values.
    pub fn forecast_consumption(&self, history: &[f64], periods_ahead: usize) -> Vec<f64> {
        forecast(history, periods_ahead)
    }
}
