//! Rule-based automatic control

use crate::constants::control::DEFAULT_CONTROL_THRESHOLD_W;
use crate::errors::{MonitorError, MonitorResult};
use crate::reading::Reading;

use super::ControlStrategy;

/// Directive at or above the control threshold
pub const HIGH_POWER_DIRECTIVE: &str =
    "Auto Control: High power detected. Reducing load by turning off non-essential devices.";
/// Directive below the control threshold
pub const NORMAL_POWER_DIRECTIVE: &str =
    "Auto Control: Power consumption is normal. No action needed.";

/// Sheds load whenever power exceeds a fixed threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutomaticRule {
    control_threshold: f64,
}

impl Default for AutomaticRule {
    fn default() -> Self {
        Self {
            control_threshold: DEFAULT_CONTROL_THRESHOLD_W,
        }
    }
}

impl AutomaticRule {
    /// Rule alerting at `control_threshold` Watts.
    ///
    /// Fails unless the threshold is finite and positive.
    pub fn new(control_threshold: f64) -> MonitorResult<Self> {
        if !control_threshold.is_finite() || control_threshold <= 0.0 {
            return Err(MonitorError::InvalidThreshold {
                value: control_threshold,
            });
        }
        Ok(Self { control_threshold })
    }

    /// Control threshold in Watts
    pub fn control_threshold(&self) -> f64 {
        self.control_threshold
    }
}

impl ControlStrategy for AutomaticRule {
    fn decide(&self, reading: &Reading) -> String {
        if reading.power > self.control_threshold {
            HIGH_POWER_DIRECTIVE.to_string()
        } else {
            NORMAL_POWER_DIRECTIVE.to_string()
        }
    }

    fn name(&self) -> &'static str {
        "automatic-rule"
    }
}
