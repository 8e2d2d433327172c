//! Monitor configuration
//!
//! Every field has a default, so a configuration file only needs the
//! settings it changes:
//!
//! ```json
//! {"alert_threshold": 500.0, "building": "Library", "initial_strategy": "manual"}
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALERT_THRESHOLD_W, DEFAULT_BUILDING, DEFAULT_CONTROL_THRESHOLD_W,
    DEFAULT_FORECAST_PERIODS, DEFAULT_PATTERN_WINDOW, MAX_FORECAST_PERIODS,
};
use crate::control::{AutomaticMl, AutomaticRule, ManualControl, ManualMode, Strategy};
use crate::errors::{MonitorError, MonitorResult};

/// Strategy a monitor starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitialStrategy {
    /// Threshold rule on power
    AutomaticRule,
    /// Load-level classifier, banded until a model is attached
    #[default]
    AutomaticMl,
    /// Operator-selected mode
    Manual,
}

/// Monitor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Alert threshold for analysis, in Watts
    pub alert_threshold: f64,
    /// Threshold for rule-based control, in Watts
    pub control_threshold: f64,
    /// Moving average window for pattern detection
    pub pattern_window: usize,
    /// Number of periods to forecast
    pub forecast_periods: usize,
    /// Building name recorded with logged readings
    pub building: String,
    /// Mode used when the manual strategy is selected
    pub manual_mode: ManualMode,
    /// Strategy installed at startup
    pub initial_strategy: InitialStrategy,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            alert_threshold: DEFAULT_ALERT_THRESHOLD_W,
            control_threshold: DEFAULT_CONTROL_THRESHOLD_W,
            pattern_window: DEFAULT_PATTERN_WINDOW,
            forecast_periods: DEFAULT_FORECAST_PERIODS,
            building: DEFAULT_BUILDING.to_string(),
            manual_mode: ManualMode::default(),
            initial_strategy: InitialStrategy::default(),
        }
    }
}

impl MonitorConfig {
    /// Default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alert threshold
    pub fn alert_threshold(mut self, watts: f64) -> Self {
        self.alert_threshold = watts;
        self
    }

    /// Set the rule-based control threshold
    pub fn control_threshold(mut self, watts: f64) -> Self {
        self.control_threshold = watts;
        self
    }

    /// Set the pattern detection window
    pub fn pattern_window(mut self, window: usize) -> Self {
        self.pattern_window = window;
        self
    }

    /// Set the forecast horizon
    pub fn forecast_periods(mut self, periods: usize) -> Self {
        self.forecast_periods = periods;
        self
    }

    /// Set the building name
    pub fn building(mut self, name: impl Into<String>) -> Self {
        self.building = name.into();
        self
    }

    /// Set the manual mode
    pub fn manual_mode(mut self, mode: ManualMode) -> Self {
        self.manual_mode = mode;
        self
    }

    /// Set the starting strategy
    pub fn initial_strategy(mut self, strategy: InitialStrategy) -> Self {
        self.initial_strategy = strategy;
        self
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> MonitorResult<Self> {
        let config: MonitorConfig =
            serde_json::from_str(json).map_err(|e| MonitorError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> MonitorResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check every setting, reporting the first invalid one.
    pub fn validate(&self) -> MonitorResult<()> {
        for (name, value) in [
            ("alert_threshold", self.alert_threshold),
            ("control_threshold", self.control_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MonitorError::config(format!(
                    "{name} must be finite and greater than zero, got {value}"
                )));
            }
        }

        if self.pattern_window == 0 {
            return Err(MonitorError::config("pattern_window must be at least 1"));
        }

        if self.forecast_periods > MAX_FORECAST_PERIODS {
            return Err(MonitorError::config(format!(
                "forecast_periods must be at most {MAX_FORECAST_PERIODS}, got {}",
                self.forecast_periods
            )));
        }

        if self.building.trim().is_empty() {
            return Err(MonitorError::config("building must not be empty"));
        }

        Ok(())
    }

    /// Build the configured starting strategy.
    pub fn strategy(&self) -> MonitorResult<Strategy> {
        Ok(match self.initial_strategy {
            InitialStrategy::AutomaticRule => AutomaticRule::new(self.control_threshold)?.into(),
            InitialStrategy::AutomaticMl => AutomaticMl::without_model().into(),
            InitialStrategy::Manual => ManualControl::new(self.manual_mode).into(),
        })
    }
}
