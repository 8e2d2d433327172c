//! Short-horizon consumption forecast
//!
//! Weighted moving average over the last [`FORECAST_WINDOW`] values, most
//! recent value weighted highest. Each step's prediction is appended to a
//! working copy of the series before the next step, so later steps build on
//! earlier predictions. The loop is inherently sequential.

use heapless::Vec as WindowVec;

use super::{mean, round2};
use crate::constants::analysis::{FORECAST_WEIGHTS, FORECAST_WINDOW, MAX_FORECAST_PERIODS};

/// Forecast `periods_ahead` values following `history`.
///
/// - empty history: empty forecast
/// - fewer than [`FORECAST_WINDOW`] values: the plain mean, repeated
/// - otherwise: weighted autoregressive steps, each rounded to two decimals
///
/// The caller's slice is never modified.
pub fn forecast(history: &[f64], periods_ahead: usize) -> Vec<f64> {
    let Some(average) = mean(history) else {
        return Vec::new();
    };

    if history.len() < FORECAST_WINDOW {
        return vec![average; periods_ahead];
    }

    let mut working = history.to_vec();
    let mut projected = Vec::with_capacity(periods_ahead.min(MAX_FORECAST_PERIODS));

    for _ in 0..periods_ahead {
        let tail = &working[working.len() - FORECAST_WINDOW..];
        let Some(prediction) = weighted_step(tail) else {
            break;
        };
        projected.push(round2(prediction));
        working.push(prediction);
    }

    log::debug!(
        "Forecast {} periods from {} readings: {:?}",
        periods_ahead,
        history.len(),
        projected
    );

    projected
}

/// One weighted prediction from the trailing values of `tail`.
///
/// Uses at most [`FORECAST_WINDOW`] values. With fewer, the trailing weights
/// are rescaled to sum to one. `None` for an empty tail.
pub fn weighted_step(tail: &[f64]) -> Option<f64> {
    let n = tail.len().min(FORECAST_WINDOW);
    if n == 0 {
        return None;
    }

    let values = &tail[tail.len() - n..];

    if n == FORECAST_WINDOW {
        return Some(values.iter().zip(FORECAST_WEIGHTS.iter()).map(|(v, w)| v * w).sum());
    }

    let trailing = &FORECAST_WEIGHTS[FORECAST_WINDOW - n..];
    let total: f64 = trailing.iter().sum();
    let weights: WindowVec<f64, FORECAST_WINDOW> = trailing.iter().map(|w| w / total).collect();

    Some(values.iter().zip(weights.iter()).map(|(v, w)| v * w).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_has_no_forecast() {
        assert!(forecast(&[], 3).is_empty());
    }

    #[test]
    fn short_history_repeats_mean() {
        assert_eq!(forecast(&[100.0, 200.0, 300.0], 3), vec![200.0, 200.0, 200.0]);
        assert_eq!(forecast(&[100.0, 200.0], 0), Vec::<f64>::new());
    }

    #[test]
    fn weighted_steps_feed_back() {
        let history = [1.0, 2.0, 3.0, 4.0, 5.0];
        let projected = forecast(&history, 3);

        // 0.1 + 0.3 + 0.6 + 1.0 + 1.5 = 3.5
        // then [2, 3, 4, 5, 3.5] and [3, 4, 5, 3.5, 3.75]
        assert_eq!(projected, vec![3.5, 3.75, 3.9]);
    }

    #[test]
    fn constant_history_forecasts_constant() {
        let projected = forecast(&[420.0; 8], 4);
        assert_eq!(projected, vec![420.0; 4]);
    }

    #[test]
    fn caller_history_untouched() {
        let history = vec![300.0, 310.0, 320.0, 330.0, 340.0];
        let before = history.clone();
        let _ = forecast(&history, 5);

        assert_eq!(history, before);
    }

    #[test]
    fn short_tail_renormalizes_weights() {
        // Trailing weights 0.25 and 0.3 rescale to 5/11 and 6/11
        let prediction = weighted_step(&[110.0, 220.0]).unwrap();
        assert!((prediction - (110.0 * 5.0 / 11.0 + 220.0 * 6.0 / 11.0)).abs() < 1e-9);

        assert_eq!(weighted_step(&[250.0]), Some(250.0));
        assert_eq!(weighted_step(&[]), None);
    }

    #[test]
    fn long_tail_uses_last_window_only() {
        let full = weighted_step(&[9999.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((full - 3.5).abs() < 1e-9);
    }
}
