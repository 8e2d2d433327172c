//! Statistical and trend report over a power series

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{mean, round2, AnalysisOutcome, NO_DATA_STATUS};
use crate::constants::analysis::{TREND_FALL_FACTOR, TREND_MIN_POINTS, TREND_RISE_FACTOR};
use crate::time;

/// Direction of the first-third to last-third comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Last third above the first by more than 10%
    Increasing,
    /// Last third below the first by more than 10%
    Decreasing,
    /// Within 10% either way
    Stable,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "increasing"),
            TrendDirection::Decreasing => write!(f, "decreasing"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Detailed statistics for a non-empty power series
///
/// Optional fields are left out of the serialized form when absent:
/// `median`/`std_dev` need two points, trend fields need three, and the peak
/// fields need timestamps matching the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerReport {
    /// Mean power, rounded to two decimals
    pub average: f64,
    /// Lowest reading
    pub min: f64,
    /// Highest reading
    pub max: f64,

    /// Median, present from two points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,

    /// Sample standard deviation, rounded to two decimals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,

    /// Share of readings above the alert threshold, in percent
    pub alert_percentage: f64,

    /// First-third to last-third direction, present from three points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendDirection>,

    /// Relative change of the last third against the first third, in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_change_percentage: Option<f64>,

    /// Hour of day of the highest reading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_hour: Option<u32>,

    /// Raw timestamp of the highest reading when it could not be parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_time: Option<String>,
}

/// Build the detailed report for `history` against `threshold`.
///
/// `timestamps` is only used for peak attribution, and only when it has
/// exactly one entry per reading.
pub fn build_report<S: AsRef<str>>(
    history: &[f64],
    timestamps: Option<&[S]>,
    threshold: f64,
) -> AnalysisOutcome<PowerReport> {
    let Some(average) = mean(history) else {
        return AnalysisOutcome::insufficient(NO_DATA_STATUS);
    };

    let min = history.iter().copied().fold(f64::INFINITY, f64::min);
    let max = history.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let (median, std_dev) = if history.len() > 1 {
        (Some(median(history)), Some(round2(sample_std_dev(history, average))))
    } else {
        (None, None)
    };

    let alerts = history.iter().filter(|&&v| v > threshold).count();
    let alert_percentage = round2(alerts as f64 / history.len() as f64 * 100.0);

    let mut report = PowerReport {
        average: round2(average),
        min,
        max,
        median,
        std_dev,
        alert_percentage,
        trend: None,
        trend_change_percentage: None,
        peak_hour: None,
        peak_time: None,
    };

    if let Some((direction, change)) = trend(history) {
        report.trend = Some(direction);
        report.trend_change_percentage = change;
    }

    if let Some(timestamps) = timestamps.filter(|ts| ts.len() == history.len()) {
        let peak: &str = timestamps[peak_index(history)].as_ref();
        match time::hour_of_day(peak) {
            Some(hour) => report.peak_hour = Some(hour),
            None => report.peak_time = Some(peak.to_string()),
        }
    }

    AnalysisOutcome::Ready(report)
}

/// Compare the mean of the first third with the mean of the last third.
///
/// Returns `None` below three points. The change percentage is `None` when
/// the first third averages zero.
fn trend(history: &[f64]) -> Option<(TrendDirection, Option<f64>)> {
    if history.len() < TREND_MIN_POINTS {
        return None;
    }

    let third = history.len() / 3;
    let first = mean(&history[..third])?;
    let last = mean(&history[history.len() - third..])?;

    let direction = if last > first * TREND_RISE_FACTOR {
        TrendDirection::Increasing
    } else if last < first * TREND_FALL_FACTOR {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    let change = (first != 0.0).then(|| round2((last - first) / first * 100.0));

    Some((direction, change))
}

/// Index of the first occurrence of the maximum.
fn peak_index(history: &[f64]) -> usize {
    let mut best = 0;
    for (i, &value) in history.iter().enumerate().skip(1) {
        if value > history[best] {
            best = i;
        }
    }
    best
}

fn median(history: &[f64]) -> f64 {
    let mut sorted = history.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn sample_std_dev(history: &[f64], average: f64) -> f64 {
    let sum_sq: f64 = history.iter().map(|v| (v - average) * (v - average)).sum();
    libm::sqrt(sum_sq / (history.len() - 1) as f64)
}
