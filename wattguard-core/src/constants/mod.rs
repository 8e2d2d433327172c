//! Constants for WattGuard Core
//!
//! Centralized numeric parameters for the analysis and control algorithms.
//! Every tunable number the engine relies on lives here so the algorithms
//! themselves stay free of magic numbers.
//!
//! ## Organization
//!
//! - **Analysis**: severity cutoffs, trend factors, pattern and forecast parameters
//! - **Control**: power bands for automatic control, default thresholds
//! - **Sensors**: simulated sensor ranges

/// Severity, trend, pattern and forecast parameters.
pub mod analysis;

/// Control thresholds and automatic load bands.
pub mod control;

/// Simulated sensor ranges and daylight hours.
pub mod sensors;

pub use analysis::{
    DEFAULT_ALERT_THRESHOLD_W, DEFAULT_FORECAST_PERIODS, DEFAULT_PATTERN_WINDOW,
    FORECAST_WEIGHTS, FORECAST_WINDOW, MAX_FORECAST_PERIODS,
};

pub use control::{DEFAULT_CONTROL_THRESHOLD_W, DEFAULT_BUILDING};
