//! Adapter for controllers that only understand a power scalar
//!
//! Older controllers were written against a bare wattage. The adapter lets
//! them take part in the strategy set unchanged: it pulls `power` out of the
//! reading and hands it over.

use core::fmt;
use std::sync::Arc;

use crate::reading::Reading;

use super::ControlStrategy;

/// Controller deciding from power alone
pub trait LegacyPowerControl {
    /// Directive for the current power draw
    fn control_action(&self, power: f64) -> String;
}

impl<F> LegacyPowerControl for F
where
    F: Fn(f64) -> String,
{
    fn control_action(&self, power: f64) -> String {
        self(power)
    }
}

/// Fixed-limit controller from the first generation of building controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegacyLimitController {
    /// Power limit, in Watts
    pub limit_w: f64,
}

impl LegacyPowerControl for LegacyLimitController {
    fn control_action(&self, power: f64) -> String {
        if power > self.limit_w {
            format!(
                "Legacy Control: {power:.1} W exceeds limit of {:.1} W. Load reduction requested.",
                self.limit_w
            )
        } else {
            format!("Legacy Control: {power:.1} W within limit of {:.1} W.", self.limit_w)
        }
    }
}

/// Strategy wrapper around a [`LegacyPowerControl`]
#[derive(Clone)]
pub struct LegacyAdapter {
    inner: Arc<dyn LegacyPowerControl + Send + Sync>,
}

impl LegacyAdapter {
    /// Wrap a legacy controller
    pub fn new<L>(legacy: L) -> Self
    where
        L: LegacyPowerControl + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(legacy),
        }
    }
}

impl fmt::Debug for LegacyAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacyAdapter").finish_non_exhaustive()
    }
}

impl ControlStrategy for LegacyAdapter {
    fn decide(&self, reading: &Reading) -> String {
        self.inner.control_action(reading.power)
    }

    fn name(&self) -> &'static str {
        "legacy"
    }
}
