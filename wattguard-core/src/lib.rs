//! Power monitoring core for WattGuard
//!
//! Turns a stream of building sensor readings into alerts, statistics,
//! patterns, forecasts and control directives.
//!
//! Key properties:
//! - Analyses are pure functions of the history they are given
//! - Too little data is a normal outcome, never an error
//! - Control always yields a directive, even when a model fails
//!
//! ```
//! use wattguard_core::{MonitorConfig, PowerMonitor, Reading};
//!
//! let monitor = PowerMonitor::new(MonitorConfig::default())?;
//! let update = monitor.ingest(Reading::new("2023-01-01T12:00:00", 480.0, 22.0, 60.0, 500.0))?;
//!
//! assert_eq!(update.alerts, vec![480.0]);
//! assert!(update.control_action.is_some());
//! # Ok::<(), wattguard_core::MonitorError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod analysis;
pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod history;
pub mod monitor;
pub mod observers;
pub mod reading;
pub mod sensors;
pub mod store;
pub mod time;

// Public API
pub use analysis::{
    AnalysisEngine, AnalysisOutcome, PatternSummary, PowerReport, SeverityAlert, SeverityLevel,
    TrendDirection, TrendPattern,
};
pub use config::{InitialStrategy, MonitorConfig};
pub use control::{
    AutomaticMl, AutomaticRule, ControlContext, ControlStrategy, FeatureVector, LabelDecoder,
    LegacyAdapter, LegacyLimitController, LegacyPowerControl, LoadLevel, ManualControl,
    ManualMode, PowerClassifier, Strategy, DEGRADED_DIRECTIVE,
};
pub use errors::{ClassifierError, MonitorError, MonitorResult};
pub use history::{HistorySnapshot, HistoryStore};
pub use monitor::{MonitorUpdate, ObserverId, PowerMonitor};
pub use observers::{DashboardObserver, LogRecorder, ReadingObserver};
pub use reading::Reading;
pub use sensors::SensorSource;
#[cfg(feature = "simulator")]
pub use sensors::SimulatedSensor;
pub use store::{JsonLinesLog, LogRecord, MemoryLog, ReadingLog};
pub use time::{Clock, FixedClock, SystemClock};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
