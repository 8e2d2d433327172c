//! Pattern detection over a smoothed power series
//!
//! The series is first smoothed with a sliding moving average. Trend and
//! oscillation are read from the smoothed values, spikes from the raw ones:
//!
//! ```text
//! raw:      ▁▂▁█▁▂▃▂▃▄
//! smoothed:  ▂▃▃▃▃▃▄        window = 5 → len - 5 + 1 averages
//!            └┬┘
//!             increases / decreases between neighbors → trend pattern
//!             local peaks and troughs                  → cyclic flag
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{AnalysisOutcome, INSUFFICIENT_PATTERN_STATUS};
use crate::constants::analysis::{CONSISTENT_TREND_RATIO, CYCLIC_REVERSAL_RATIO, SPIKE_FACTOR};

/// Dominant direction of the smoothed series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendPattern {
    /// More than 70% of steps rise
    ConsistentIncrease,
    /// More than 70% of steps fall
    ConsistentDecrease,
    /// No dominant direction
    Fluctuating,
}

impl fmt::Display for TrendPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendPattern::ConsistentIncrease => write!(f, "consistent_increase"),
            TrendPattern::ConsistentDecrease => write!(f, "consistent_decrease"),
            TrendPattern::Fluctuating => write!(f, "fluctuating"),
        }
    }
}

/// Patterns found in a power series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternSummary {
    /// Direction of the smoothed series
    pub trend_pattern: TrendPattern,

    /// Present (and `true`) only when the smoothed series oscillates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cyclic_pattern: Option<bool>,

    /// Raw points standing well above both neighbors
    pub spike_count: usize,
}

/// Detect trend, oscillation and spikes.
///
/// Needs at least `2 * window_size` points and a non-zero window, otherwise
/// the outcome is insufficient and carries no pattern fields.
pub fn detect_patterns(history: &[f64], window_size: usize) -> AnalysisOutcome<PatternSummary> {
    if window_size == 0 || history.len() < window_size * 2 {
        return AnalysisOutcome::insufficient(INSUFFICIENT_PATTERN_STATUS);
    }

    let averages = moving_averages(history, window_size);

    AnalysisOutcome::Ready(PatternSummary {
        trend_pattern: trend_pattern(&averages),
        cyclic_pattern: is_cyclic(&averages).then_some(true),
        spike_count: count_spikes(history),
    })
}

/// Mean of every run of `window` consecutive points.
pub fn moving_averages(history: &[f64], window: usize) -> Vec<f64> {
    history
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect()
}

fn trend_pattern(averages: &[f64]) -> TrendPattern {
    let comparisons = averages.len().saturating_sub(1) as f64;
    let (increases, decreases) = averages.windows(2).fold((0usize, 0usize), |(up, down), w| {
        if w[1] > w[0] {
            (up + 1, down)
        } else if w[1] < w[0] {
            (up, down + 1)
        } else {
            (up, down)
        }
    });

    if increases as f64 > comparisons * CONSISTENT_TREND_RATIO {
        TrendPattern::ConsistentIncrease
    } else if decreases as f64 > comparisons * CONSISTENT_TREND_RATIO {
        TrendPattern::ConsistentDecrease
    } else {
        TrendPattern::Fluctuating
    }
}

fn is_cyclic(averages: &[f64]) -> bool {
    let triples = averages.len().saturating_sub(2) as f64;
    let reversals = averages
        .windows(3)
        .filter(|w| (w[1] > w[0] && w[1] > w[2]) || (w[1] < w[0] && w[1] < w[2]))
        .count();

    reversals as f64 > triples * CYCLIC_REVERSAL_RATIO
}

/// Interior points above both neighbors by at least [`SPIKE_FACTOR`].
pub fn count_spikes(history: &[f64]) -> usize {
    history
        .windows(3)
        .filter(|w| {
            let (left, value, right) = (w[0], w[1], w[2]);
            value > left
                && value > right
                && value >= left * SPIKE_FACTOR
                && value >= right * SPIKE_FACTOR
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_history_is_insufficient() {
        let outcome = detect_patterns(&[1.0; 9], 5);

        assert!(!outcome.is_ready());
        assert_eq!(outcome.status(), Some(INSUFFICIENT_PATTERN_STATUS));
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"status":"Insufficient data for pattern detection"}"#
        );
    }

    #[test]
    fn zero_window_is_insufficient() {
        assert!(!detect_patterns(&[1.0, 2.0, 3.0], 0).is_ready());
    }

    #[test]
    fn moving_average_count() {
        let history: Vec<f64> = (1..=10).map(f64::from).collect();
        let averages = moving_averages(&history, 5);

        assert_eq!(averages.len(), 6);
        assert_eq!(averages[0], 3.0);
        assert_eq!(averages[5], 8.0);
    }

    #[test]
    fn rising_series_is_consistent_increase() {
        let history: Vec<f64> = (0..12).map(|i| 100.0 + 10.0 * i as f64).collect();
        let summary = detect_patterns(&history, 5).into_ready().unwrap();

        assert_eq!(summary.trend_pattern, TrendPattern::ConsistentIncrease);
        assert_eq!(summary.cyclic_pattern, None);
        assert_eq!(summary.spike_count, 0);
    }

    #[test]
    fn falling_series_is_consistent_decrease() {
        let history: Vec<f64> = (0..12).map(|i| 500.0 - 20.0 * i as f64).collect();
        let summary = detect_patterns(&history, 5).into_ready().unwrap();

        assert_eq!(summary.trend_pattern, TrendPattern::ConsistentDecrease);
    }

    #[test]
    fn alternating_series_is_cyclic() {
        let history: Vec<f64> = (0..10).map(|i| if i % 2 == 0 { 100.0 } else { 300.0 }).collect();
        let summary = detect_patterns(&history, 2).into_ready().unwrap();

        // Window of 2 flattens the alternation completely
        assert_eq!(summary.trend_pattern, TrendPattern::Fluctuating);
        assert_eq!(summary.cyclic_pattern, None);
        assert_eq!(summary.spike_count, 4);

        let summary = detect_patterns(&history, 3).into_ready().unwrap();
        assert_eq!(summary.cyclic_pattern, Some(true));
    }

    #[test]
    fn spikes_need_both_neighbors() {
        assert_eq!(count_spikes(&[100.0, 150.0, 100.0]), 1);
        assert_eq!(count_spikes(&[100.0, 149.0, 100.0]), 0);
        assert_eq!(count_spikes(&[100.0, 300.0, 250.0]), 0);
        assert_eq!(count_spikes(&[0.0, 0.0, 0.0]), 0);
        assert_eq!(count_spikes(&[100.0, 400.0, 100.0, 400.0, 100.0]), 2);
    }
}
