//! Control Strategies
//!
//! A strategy turns the latest [`Reading`] into a human-readable directive.
//! Exactly one strategy is active in a [`ControlContext`] at a time; callers
//! swap it at runtime without the context knowing which kind it holds.
//!
//! | Strategy        | Decides from                       |
//! |-----------------|------------------------------------|
//! | `AutomaticRule` | power against a fixed threshold    |
//! | `AutomaticMl`   | trained classifier, or power bands |
//! | `Manual`        | operator-selected mode only        |
//! | `Legacy`        | a power-only legacy controller     |
//!
//! Deciding never fails. Strategies that can fail internally recover and
//! still return a directive.

pub mod classifier;
pub mod legacy;
pub mod manual;
pub mod ml;
pub mod rule;

use std::sync::{Arc, PoisonError, RwLock};

use crate::reading::Reading;

pub use classifier::{FeatureVector, LabelDecoder, LoadLevel, PowerClassifier, FEATURE_COUNT};
pub use legacy::{LegacyAdapter, LegacyLimitController, LegacyPowerControl};
pub use manual::{ManualControl, ManualMode};
pub use ml::{level_directive, power_band, AutomaticMl, DEGRADED_DIRECTIVE};
pub use rule::AutomaticRule;

/// Decision policy producing a directive from one reading
pub trait ControlStrategy {
    /// Directive for one reading. Never fails.
    fn decide(&self, reading: &Reading) -> String;

    /// Short identifier used in logs and configuration.
    fn name(&self) -> &'static str;
}

/// The closed set of control strategies
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Fixed threshold rule
    AutomaticRule(AutomaticRule),
    /// Load classification
    AutomaticMl(AutomaticMl),
    /// Operator override
    Manual(ManualControl),
    /// First-generation controller
    Legacy(LegacyAdapter),
}

impl Strategy {
    fn as_dyn(&self) -> &dyn ControlStrategy {
        match self {
            Strategy::AutomaticRule(s) => s,
            Strategy::AutomaticMl(s) => s,
            Strategy::Manual(s) => s,
            Strategy::Legacy(s) => s,
        }
    }
}

impl ControlStrategy for Strategy {
    fn decide(&self, reading: &Reading) -> String {
        self.as_dyn().decide(reading)
    }

    fn name(&self) -> &'static str {
        self.as_dyn().name()
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::AutomaticMl(AutomaticMl::without_model())
    }
}

impl From<AutomaticRule> for Strategy {
    fn from(s: AutomaticRule) -> Self {
        Strategy::AutomaticRule(s)
    }
}

impl From<AutomaticMl> for Strategy {
    fn from(s: AutomaticMl) -> Self {
        Strategy::AutomaticMl(s)
    }
}

impl From<ManualControl> for Strategy {
    fn from(s: ManualControl) -> Self {
        Strategy::Manual(s)
    }
}

impl From<LegacyAdapter> for Strategy {
    fn from(s: LegacyAdapter) -> Self {
        Strategy::Legacy(s)
    }
}

/// Holds the active strategy and runs it
///
/// `execute_control` clones the active `Arc` and releases the lock before
/// deciding, so a concurrent swap never waits on a slow decision and a
/// decision never sees half a swap.
#[derive(Debug)]
pub struct ControlContext {
    active: RwLock<Arc<Strategy>>,
}

impl Default for ControlContext {
    fn default() -> Self {
        Self::new(Strategy::default())
    }
}

impl ControlContext {
    /// Context starting with `strategy`
    pub fn new(strategy: impl Into<Arc<Strategy>>) -> Self {
        Self {
            active: RwLock::new(strategy.into()),
        }
    }

    /// Directive from the active strategy.
    pub fn execute_control(&self, reading: &Reading) -> String {
        let strategy = self.active();
        let directive = strategy.decide(reading);
        log::debug!("{} decided at {}: {}", strategy.name(), reading.timestamp, directive);
        directive
    }

    /// Replace the active strategy, returning the one it replaced.
    pub fn set_strategy(&self, strategy: impl Into<Arc<Strategy>>) -> Arc<Strategy> {
        let strategy = strategy.into();
        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        log::info!("Control strategy changed from {} to {}", active.name(), strategy.name());
        std::mem::replace(&mut *active, strategy)
    }

    /// Strategy currently in charge
    pub fn active(&self) -> Arc<Strategy> {
        Arc::clone(&self.active.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Change the mode of the active manual strategy.
    ///
    /// Returns `false` and changes nothing when the active strategy is not
    /// manual.
    pub fn set_manual_mode(&self, mode: ManualMode) -> bool {
        match &*self.active() {
            Strategy::Manual(manual) => {
                manual.set_mode(mode);
                true
            }
            _ => false,
        }
    }
}
